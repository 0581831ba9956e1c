//! Uniform async task lifecycle.
//!
//! Every remote call runs as a spawned task with a `TaskStarted` /
//! `TaskCompleted` pair. The reducer allocates ids from `TaskSeq` when it
//! emits an effect; a completion whose id no longer matches the active one
//! is dropped (stale result from before a navigation or logout).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Auth,
    Profile,
    Buy,
    Sell,
    DailyClaim,
    ChatFetch,
    ChatSend,
    RosterFetch,
    Grant,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tasks {
    pub auth: TaskState,
    pub profile: TaskState,
    pub buy: TaskState,
    pub sell: TaskState,
    pub daily_claim: TaskState,
    pub chat_fetch: TaskState,
    pub chat_send: TaskState,
    pub roster_fetch: TaskState,
    pub grant: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Auth => &self.auth,
            TaskKind::Profile => &self.profile,
            TaskKind::Buy => &self.buy,
            TaskKind::Sell => &self.sell,
            TaskKind::DailyClaim => &self.daily_claim,
            TaskKind::ChatFetch => &self.chat_fetch,
            TaskKind::ChatSend => &self.chat_send,
            TaskKind::RosterFetch => &self.roster_fetch,
            TaskKind::Grant => &self.grant,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Auth => &mut self.auth,
            TaskKind::Profile => &mut self.profile,
            TaskKind::Buy => &mut self.buy,
            TaskKind::Sell => &mut self.sell,
            TaskKind::DailyClaim => &mut self.daily_claim,
            TaskKind::ChatFetch => &mut self.chat_fetch,
            TaskKind::ChatSend => &mut self.chat_send,
            TaskKind::RosterFetch => &mut self.roster_fetch,
            TaskKind::Grant => &mut self.grant,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.auth.is_running()
            || self.profile.is_running()
            || self.buy.is_running()
            || self.sell.is_running()
            || self.daily_claim.is_running()
            || self.chat_fetch.is_running()
            || self.chat_send.is_running()
            || self.roster_fetch.is_running()
            || self.grant.is_running()
    }
}

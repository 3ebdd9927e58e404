//! Task reminders
//!
//! A reminder plan is derived purely from a task and the current time:
//! reminders 24h, 6h and 1h before the due date, or a single immediate
//! "overdue" reminder when the due date has already passed. Reminder ids are
//! a hash of the task id combined with the offset, so a task's reminders can
//! be cancelled by recomputing ids instead of keeping a lookup table.
//!
//! The device notification API sits behind the `Notifier` trait;
//! `ReminderBook` implements it on top of the key-value store.

use crate::error::StorageError;
use crate::model::Task;
use crate::storage::{NOTIFICATIONS_ENABLED_KEY, NOTIFICATIONS_KEY, Storage};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Offsets (hours before due) for regular reminders
pub const REMINDER_OFFSETS: [u32; 3] = [24, 6, 1];

/// Offset used for the overdue reminder
pub const OVERDUE_OFFSET: u32 = 0;

const ID_BASE_MODULUS: i64 = 100_000;

/// Stable hash of a task id, compatible with 32-bit `h * 31 + c` string
/// hashing over UTF-16 code units.
pub fn task_id_hash(task_id: &str) -> i32 {
    task_id.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Notification id for a task reminder at `hours_before` its due date
pub fn notification_id(task_id: &str, hours_before: u32) -> i32 {
    let base = i64::from(task_id_hash(task_id)).abs() % ID_BASE_MODULUS;
    // base < 100_000 keeps the result well inside i32
    (base * 10 + i64::from(hours_before)) as i32
}

/// Every id a task could have scheduled, for cancellation
pub fn cancel_ids(task_id: &str) -> Vec<i32> {
    REMINDER_OFFSETS
        .iter()
        .chain(std::iter::once(&OVERDUE_OFFSET))
        .map(|&hours| notification_id(task_id, hours))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Reminder,
    Overdue,
}

/// One scheduled local notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i32,
    pub task_id: String,
    pub kind: ReminderKind,
    pub hours_before: u32,
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

impl Reminder {
    fn new(task: &Task, hours_before: u32, fire_at: NaiveDateTime) -> Self {
        let (kind, body) = if hours_before == OVERDUE_OFFSET {
            (ReminderKind::Overdue, "This task is overdue!".to_string())
        } else {
            (
                ReminderKind::Reminder,
                format!("This task is due in {}h", hours_before),
            )
        };
        Self {
            id: notification_id(&task.id, hours_before),
            task_id: task.id.clone(),
            kind,
            hours_before,
            fire_at,
            title: format!("Task: {}", task.title),
            body,
        }
    }
}

/// Reminders a task should have at `now`.
///
/// Completed tasks get none. A task already past its due date gets one
/// overdue reminder firing immediately. Otherwise each offset whose fire
/// time is still in the future yields a reminder.
pub fn plan_reminders(task: &Task, now: NaiveDateTime) -> Vec<Reminder> {
    if task.completed {
        return Vec::new();
    }

    if task.due_date < now {
        return vec![Reminder::new(task, OVERDUE_OFFSET, now)];
    }

    REMINDER_OFFSETS
        .iter()
        .filter_map(|&hours| {
            let fire_at = task.due_date - Duration::hours(i64::from(hours));
            (fire_at > now).then(|| Reminder::new(task, hours, fire_at))
        })
        .collect()
}

/// Device notification API
pub trait Notifier: Send + Sync {
    fn schedule(&self, reminders: &[Reminder]) -> Result<(), StorageError>;

    /// Cancel by id; unknown ids are ignored
    fn cancel(&self, ids: &[i32]) -> Result<(), StorageError>;

    fn cancel_all(&self) -> Result<(), StorageError>;

    /// Pending reminders, soonest first
    fn pending(&self) -> Result<Vec<Reminder>, StorageError>;
}

/// Notifier that keeps pending reminders in the store
pub struct ReminderBook {
    storage: Arc<Storage>,
}

impl ReminderBook {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    fn load(&self) -> Result<Vec<Reminder>, StorageError> {
        Ok(self
            .storage
            .get::<Vec<Reminder>>(NOTIFICATIONS_KEY)?
            .unwrap_or_default())
    }
}

impl Notifier for ReminderBook {
    fn schedule(&self, reminders: &[Reminder]) -> Result<(), StorageError> {
        if reminders.is_empty() {
            return Ok(());
        }
        let mut book = self.load()?;
        for reminder in reminders {
            // Same id replaces the previous reminder, as on the device
            book.retain(|r| r.id != reminder.id);
            book.push(reminder.clone());
        }
        self.storage.set(NOTIFICATIONS_KEY, &book)
    }

    fn cancel(&self, ids: &[i32]) -> Result<(), StorageError> {
        let mut book = self.load()?;
        let before = book.len();
        book.retain(|r| !ids.contains(&r.id));
        if book.len() != before {
            self.storage.set(NOTIFICATIONS_KEY, &book)?;
        }
        Ok(())
    }

    fn cancel_all(&self) -> Result<(), StorageError> {
        self.storage.remove(NOTIFICATIONS_KEY)?;
        Ok(())
    }

    fn pending(&self) -> Result<Vec<Reminder>, StorageError> {
        let mut book = self.load()?;
        book.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then(a.id.cmp(&b.id)));
        Ok(book)
    }
}

/// Keeps a task's reminders in line with its current state
pub struct NotificationService {
    notifier: Box<dyn Notifier>,
    storage: Arc<Storage>,
}

impl NotificationService {
    pub fn new(storage: Arc<Storage>, notifier: Box<dyn Notifier>) -> Self {
        Self { notifier, storage }
    }

    /// Reminders on by default
    pub fn is_enabled(&self) -> Result<bool, StorageError> {
        Ok(self
            .storage
            .get::<bool>(NOTIFICATIONS_ENABLED_KEY)?
            .unwrap_or(true))
    }

    /// Persist the flag. Disabling cancels everything pending.
    pub fn set_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.storage.set(NOTIFICATIONS_ENABLED_KEY, &enabled)?;
        if !enabled {
            self.notifier.cancel_all()?;
        }
        tracing::info!(enabled, "reminders toggled");
        Ok(())
    }

    /// Cancel the task's reminders, then schedule its current plan.
    ///
    /// Returns the reminders scheduled.
    pub fn sync_task(&self, task: &Task, now: NaiveDateTime) -> Result<Vec<Reminder>, StorageError> {
        self.notifier.cancel(&cancel_ids(&task.id))?;
        if !self.is_enabled()? {
            return Ok(Vec::new());
        }
        let plan = plan_reminders(task, now);
        self.notifier.schedule(&plan)?;
        tracing::debug!(task_id = %task.id, scheduled = plan.len(), "reminders synced");
        Ok(plan)
    }

    pub fn cancel_task(&self, task_id: &str) -> Result<(), StorageError> {
        self.notifier.cancel(&cancel_ids(task_id))
    }

    /// Re-plan every task; returns the number of reminders scheduled
    pub fn check_all(&self, tasks: &[Task], now: NaiveDateTime) -> Result<usize, StorageError> {
        let mut scheduled = 0;
        for task in tasks {
            scheduled += self.sync_task(task, now)?.len();
        }
        Ok(scheduled)
    }

    pub fn cancel_all(&self) -> Result<(), StorageError> {
        self.notifier.cancel_all()
    }

    pub fn pending(&self) -> Result<Vec<Reminder>, StorageError> {
        self.notifier.pending()
    }
}

//! Task player: the screen where a patient works through one exercise.
//!
//! Recall tasks open with a timed preview of the guide, then switch to
//! practice with the guide hidden. Guided tasks go straight to practice.
//! Time is driven by [`TaskPlayer::on_second`], which a [`PlayerTimer`]
//! calls once per second on the async runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use super::{Notification, Notifications, PageResult, PageState};
use crate::api::MockApi;
use crate::config::PlayerConfig;
use crate::models::{AttemptData, KolamDesign, Patient, Task, TaskMode};
use crate::session::Session;

/// Note attached to every submitted attempt.
const ATTEMPT_NOTE: &str = "Task completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preview,
    Practice,
    Completed,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Preview => "Preview",
            Phase::Practice => "Practice",
            Phase::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub task: Task,
    pub design: KolamDesign,
    pub patient: Patient,
}

/// Sends one tick per period until dropped.
#[derive(Debug)]
pub struct PlayerTimer {
    handle: JoinHandle<()>,
    ticks: mpsc::Receiver<()>,
}

impl PlayerTimer {
    /// Spawn the ticking task. Must be called inside a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { handle, ticks }
    }

    /// Wait for the next tick. `None` once the timer has been cancelled.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for PlayerTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
pub struct TaskPlayer {
    task_id: String,
    config: PlayerConfig,
    state: PageState<PlayerView>,
    phase: Phase,
    playing: bool,
    progress: f64,
    show_guide: bool,
    elapsed_secs: u64,
    preview_remaining: u32,
    timer: Option<PlayerTimer>,
    notifications: Notifications,
}

impl TaskPlayer {
    pub fn new(task_id: impl Into<String>, config: PlayerConfig) -> Self {
        Self {
            task_id: task_id.into(),
            config,
            state: PageState::Loading,
            phase: Phase::Preview,
            playing: false,
            progress: 0.0,
            show_guide: false,
            elapsed_secs: 0,
            preview_remaining: 0,
            timer: None,
            notifications: Notifications::default(),
        }
    }

    pub fn state(&self) -> &PageState<PlayerView> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn shows_guide(&self) -> bool {
        self.show_guide
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Seconds left before the preview hides the guide.
    pub fn preview_remaining(&self) -> u32 {
        self.preview_remaining
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    fn mode(&self) -> Option<TaskMode> {
        self.state.ready().map(|view| view.task.mode)
    }

    /// Load the task, then its design and patient.
    pub async fn load(&mut self, api: &MockApi, session: &Session) -> PageResult<()> {
        session.require_user()?;
        self.state = PageState::Loading;

        let task = match api.get_task(&self.task_id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                warn!(task_id = %self.task_id, "Task not found");
                self.load_failed();
                return Ok(());
            }
            Err(e) => {
                warn!(task_id = %self.task_id, error = %e, "Failed to load task");
                self.load_failed();
                return Err(e.into());
            }
        };

        let loaded = tokio::try_join!(
            api.get_kolam_design(&task.kolam_id),
            api.get_patient(&task.patient_id),
        );
        let (design, patient) = match loaded {
            Ok(parts) => parts,
            Err(e) => {
                warn!(task_id = %self.task_id, error = %e, "Failed to load task");
                self.load_failed();
                return Err(e.into());
            }
        };

        let (Some(design), Some(patient)) = (design, patient) else {
            self.state = PageState::Missing;
            return Ok(());
        };

        let mode = task.mode;
        self.state = PageState::Ready(PlayerView {
            task,
            design,
            patient,
        });
        match mode {
            TaskMode::RecallSequence => self.enter_preview(self.config.recall_preview_secs),
            TaskMode::GuidedTraining => {
                self.phase = Phase::Practice;
                self.show_guide = true;
            }
        }
        Ok(())
    }

    fn load_failed(&mut self) {
        self.notifications
            .push(Notification::error("Error", "Failed to load task data"));
        self.state = PageState::Missing;
    }

    fn enter_preview(&mut self, secs: u32) {
        self.phase = Phase::Preview;
        self.show_guide = true;
        self.preview_remaining = secs;
        if secs == 0 {
            self.end_preview();
        }
    }

    fn end_preview(&mut self) {
        self.phase = Phase::Practice;
        self.show_guide = false;
        self.preview_remaining = 0;
    }

    /// Advance time by one second.
    pub fn on_second(&mut self) {
        if self.state.ready().is_none() {
            return;
        }
        match self.phase {
            Phase::Preview => {
                self.preview_remaining = self.preview_remaining.saturating_sub(1);
                if self.preview_remaining == 0 {
                    self.end_preview();
                }
            }
            Phase::Practice if self.playing => self.elapsed_secs += 1,
            _ => {}
        }
    }

    pub fn start(&mut self) {
        if self.phase != Phase::Practice {
            return;
        }
        self.playing = true;
        if self.mode() == Some(TaskMode::GuidedTraining) {
            self.show_guide = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Clear progress and time. Recall tasks go back to a short preview.
    pub fn reset(&mut self) {
        self.playing = false;
        self.progress = 0.0;
        self.elapsed_secs = 0;
        if self.mode() == Some(TaskMode::RecallSequence) && self.phase != Phase::Completed {
            self.enter_preview(self.config.reset_preview_secs);
        }
    }

    /// Show or hide the guide during recall practice.
    pub fn toggle_hint(&mut self) {
        if self.phase == Phase::Practice && self.mode() == Some(TaskMode::RecallSequence) {
            self.show_guide = !self.show_guide;
        }
    }

    /// Move the progress slider. Ignored unless playing.
    pub fn set_progress(&mut self, value: f64) {
        if self.playing && !value.is_nan() {
            self.progress = value.clamp(0.0, 100.0);
        }
    }

    pub fn can_complete(&self) -> bool {
        match (self.phase, self.mode()) {
            (Phase::Practice, Some(TaskMode::GuidedTraining)) => {
                self.progress >= self.config.guided_min_progress
            }
            (Phase::Practice, Some(TaskMode::RecallSequence)) => true,
            _ => false,
        }
    }

    /// Submit the attempt. Returns false if completion is not allowed yet.
    pub async fn complete(&mut self, api: &MockApi) -> PageResult<bool> {
        if !self.can_complete() {
            return Ok(false);
        }

        self.playing = false;
        self.phase = Phase::Completed;
        self.stop_timer();

        let attempt = AttemptData {
            progress: self.progress,
            time_elapsed_sec: self.elapsed_secs,
            notes: Some(ATTEMPT_NOTE.to_string()),
        };

        match api.submit_task(&self.task_id, attempt).await {
            Ok(task) => {
                info!(task_id = %self.task_id, "Attempt recorded");
                if let Some(view) = self.state.ready_mut() {
                    view.task = task;
                }
                self.notifications.push(Notification::info(
                    "Task Completed!",
                    "Your performance has been recorded.",
                ));
                Ok(true)
            }
            Err(e) => {
                warn!(task_id = %self.task_id, error = %e, "Failed to submit attempt");
                self.notifications.push(Notification::error(
                    "Error",
                    "Failed to submit task results",
                ));
                Err(e.into())
            }
        }
    }

    /// Start the once-per-second timer. Replaces any running timer.
    pub fn start_timer(&mut self) {
        self.timer = Some(PlayerTimer::start(Duration::from_secs(1)));
    }

    pub fn stop_timer(&mut self) {
        self.timer = None;
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Wait for the next timer tick and apply it. Returns false when no
    /// timer is running.
    pub async fn next_tick(&mut self) -> bool {
        let ticked = match self.timer.as_mut() {
            Some(timer) => timer.tick().await.is_some(),
            None => false,
        };
        if ticked {
            self.on_second();
        }
        ticked
    }
}

/// `m:ss` display of a second count.
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

//! Status poller actor and handle.
//!
//! `spawn_poller` moves the state machine, the service, and the view into one
//! tokio task. Every view callback runs on that task, so the view never sees
//! concurrent calls. Service calls run as child tasks whose results are fed
//! back through the same loop; dropping the loop aborts them.

mod machine;
mod timer;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};

use crate::error::{PollerClosed, ServiceError};
use crate::service::StatusService;
use crate::status::{StatusObject, SubjectId};
use crate::view::StatusView;

use machine::PollerCore;

/// Interval used when no configuration overrides it.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Coarse lifecycle of a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No fetch has succeeded yet and no timer runs.
    NotStarted,
    /// Last known state is settled; no timer.
    Idle,
    /// A timer exists and fires `refresh`.
    Polling,
    /// `view_leaving` ran; nothing else will happen.
    Stopped,
}

/// Point-in-time view of poller state.
#[derive(Debug, Clone)]
pub struct PollerSnapshot<S> {
    pub status: Option<S>,
    pub phase: PollPhase,
    /// Identity of the live timer, if any.
    pub timer_generation: Option<u64>,
    pub fetch_in_flight: bool,
}

impl<S> PollerSnapshot<S> {
    pub fn is_polling(&self) -> bool {
        self.timer_generation.is_some()
    }
}

/// Tunables for one poller instance.
#[derive(Debug, Clone, Copy)]
pub struct PollerOptions {
    pub interval: Duration,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

enum PollerCommand<S> {
    ViewReady(oneshot::Sender<()>),
    Refresh(oneshot::Sender<()>),
    TriggerAction(oneshot::Sender<()>),
    Snapshot(oneshot::Sender<PollerSnapshot<S>>),
    ViewLeaving(oneshot::Sender<()>),
}

/// Completion of a child service call.
enum ServiceDone<S> {
    Fetch(Result<S, ServiceError>),
    Trigger(Result<bool, ServiceError>),
}

/// Handle for driving a spawned poller.
///
/// Each method resolves once the actor has applied the command. Service
/// calls the command starts keep running in the background.
pub struct PollerHandle<S> {
    subject: SubjectId,
    commands: mpsc::Sender<PollerCommand<S>>,
    actor: JoinHandle<()>,
}

impl<S: StatusObject> PollerHandle<S> {
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    /// Show loading, then perform the initial fetch.
    pub async fn view_ready(&self) -> Result<(), PollerClosed> {
        self.request(PollerCommand::ViewReady).await
    }

    /// Fetch the status now. Folded into a fetch that is already pending.
    pub async fn refresh(&self) -> Result<(), PollerClosed> {
        self.request(PollerCommand::Refresh).await
    }

    /// Optimistically mark the status in progress, render it, start polling,
    /// and ask the service to start the remote job.
    ///
    /// The optimistic render has happened by the time this resolves.
    pub async fn trigger_action(&self) -> Result<(), PollerClosed> {
        self.request(PollerCommand::TriggerAction).await
    }

    pub async fn snapshot(&self) -> Result<PollerSnapshot<S>, PollerClosed> {
        self.request(PollerCommand::Snapshot).await
    }

    /// Cancel the timer and shut the actor down. No view callback runs after
    /// this resolves.
    pub async fn view_leaving(self) -> Result<(), PollerClosed> {
        let PollerHandle {
            commands, actor, ..
        } = self;
        let (ack_tx, ack_rx) = oneshot::channel();
        let sent = commands.send(PollerCommand::ViewLeaving(ack_tx)).await;
        drop(commands);
        let acked = match sent {
            Ok(()) => ack_rx.await.map_err(|_| PollerClosed),
            Err(_) => Err(PollerClosed),
        };
        // A panicking view or service already tore the actor down.
        let _ = actor.await;
        acked
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> PollerCommand<S>,
    ) -> Result<T, PollerClosed> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| PollerClosed)?;
        reply_rx.await.map_err(|_| PollerClosed)
    }
}

/// Spawn a poller for `subject`. Must be called inside a tokio runtime.
pub fn spawn_poller<S, Svc, V>(
    options: PollerOptions,
    subject: SubjectId,
    service: Svc,
    view: V,
) -> PollerHandle<S>
where
    S: StatusObject,
    Svc: StatusService<S> + 'static,
    V: StatusView<S>,
{
    let (command_tx, command_rx) = mpsc::channel::<PollerCommand<S>>(64);
    let machine = PollerCore::new(view, options.interval);
    let actor = tokio::spawn(run_actor(
        machine,
        Arc::new(service),
        subject.clone(),
        command_rx,
    ));
    PollerHandle {
        subject,
        commands: command_tx,
        actor,
    }
}

async fn run_actor<S, Svc, V>(
    mut machine: PollerCore<S, V>,
    service: Arc<Svc>,
    subject: SubjectId,
    mut commands: mpsc::Receiver<PollerCommand<S>>,
) where
    S: StatusObject,
    Svc: StatusService<S> + 'static,
    V: StatusView<S>,
{
    let mut calls: JoinSet<ServiceDone<S>> = JoinSet::new();
    tracing::debug!(%subject, "poller started");

    loop {
        let deadline = machine.deadline();
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    // Every handle is gone; treat it as the view leaving.
                    machine.stop();
                    break;
                };
                match command {
                    PollerCommand::ViewReady(ack) => {
                        machine.view_ready();
                        if machine.begin_fetch() {
                            spawn_fetch(&mut calls, &service, &subject);
                        }
                        let _ = ack.send(());
                    }
                    PollerCommand::Refresh(ack) => {
                        if machine.begin_fetch() {
                            spawn_fetch(&mut calls, &service, &subject);
                        }
                        let _ = ack.send(());
                    }
                    PollerCommand::TriggerAction(ack) => {
                        if machine.begin_trigger() {
                            spawn_trigger(&mut calls, &service, &subject);
                        }
                        let _ = ack.send(());
                    }
                    PollerCommand::Snapshot(reply) => {
                        let _ = reply.send(machine.snapshot());
                    }
                    PollerCommand::ViewLeaving(ack) => {
                        machine.stop();
                        calls.abort_all();
                        let _ = ack.send(());
                        break;
                    }
                }
            }
            Some(joined) = calls.join_next(), if !calls.is_empty() => {
                match joined {
                    Ok(ServiceDone::Fetch(result)) => machine.finish_fetch(result),
                    Ok(ServiceDone::Trigger(result)) => machine.finish_trigger(result),
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(_) => {}
                }
            }
            _ = sleep_until_deadline(deadline), if deadline.is_some() => {
                if machine.timer_fired() {
                    spawn_fetch(&mut calls, &service, &subject);
                }
            }
        }
    }

    tracing::debug!(%subject, "poller stopped");
}

async fn sleep_until_deadline(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn spawn_fetch<S, Svc>(calls: &mut JoinSet<ServiceDone<S>>, service: &Arc<Svc>, subject: &SubjectId)
where
    S: StatusObject,
    Svc: StatusService<S> + 'static,
{
    let service = Arc::clone(service);
    let subject = subject.clone();
    calls.spawn(async move { ServiceDone::Fetch(service.fetch(&subject).await) });
}

fn spawn_trigger<S, Svc>(
    calls: &mut JoinSet<ServiceDone<S>>,
    service: &Arc<Svc>,
    subject: &SubjectId,
) where
    S: StatusObject,
    Svc: StatusService<S> + 'static,
{
    let service = Arc::clone(service);
    let subject = subject.clone();
    calls.spawn(async move { ServiceDone::Trigger(service.trigger(&subject).await) });
}

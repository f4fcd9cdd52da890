//! Sequential message loop over tokio.
//!
//! A [`Program`] is updated one message at a time; the tasks it returns are
//! spawned and their messages come back through a single channel, so
//! program state is never touched concurrently. A fresh view is published
//! on a `watch` channel after every applied message.

use std::fmt::Debug;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::{error, trace};
use tokio::sync::{mpsc, watch};

use crate::common::task::Task;

pub trait Program {
    type Message: Debug + Send + 'static;
    type View: Clone + Send + Sync + 'static;

    fn update(&mut self, message: Self::Message) -> Task<Self::Message>;

    fn view(&self) -> Self::View;
}

pub struct Runtime<P: Program> {
    program: P,
    sender: mpsc::UnboundedSender<Option<P::Message>>,
    receiver: mpsc::UnboundedReceiver<Option<P::Message>>,
    in_flight: usize,
    views: watch::Sender<P::View>,
}

impl<P: Program + Debug> Debug for Runtime<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("program", &self.program)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl<P: Program> Runtime<P> {
    pub fn new(program: P) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (views, _) = watch::channel(program.view());
        Self {
            program,
            sender,
            receiver,
            in_flight: 0,
            views,
        }
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    /// Direct access for state owned outside the message loop. Changes are
    /// published with the next applied message.
    pub fn program_mut(&mut self) -> &mut P {
        &mut self.program
    }

    pub fn view(&self) -> P::View {
        self.program.view()
    }

    /// Subscribe to the view published after each applied message.
    pub fn subscribe(&self) -> watch::Receiver<P::View> {
        self.views.subscribe()
    }

    /// Number of spawned tasks whose result has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply `message` now and spawn whatever it returns.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, message: P::Message) {
        trace!("[Runtime] applying {:?}", message);
        let task = self.program.update(message);
        self.spawn(task);
        self.views.send_replace(self.program.view());
    }

    fn spawn(&mut self, task: Task<P::Message>) {
        for future in task.into_futures() {
            self.in_flight += 1;
            let sender = self.sender.clone();
            tokio::spawn(async move {
                let message = match AssertUnwindSafe(future).catch_unwind().await {
                    Ok(message) => message,
                    Err(_) => {
                        error!("[Runtime] task panicked");
                        None
                    }
                };
                // The receiver lives as long as the runtime; a send error
                // only means the runtime was dropped.
                let _ = sender.send(message);
            });
        }
    }

    /// Apply the next task result. Returns `false` when nothing is in flight.
    pub async fn step(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        let Some(result) = self.receiver.recv().await else {
            return false;
        };
        self.in_flight -= 1;
        if let Some(message) = result {
            self.dispatch(message);
        }
        true
    }

    /// Drive until no task is in flight.
    pub async fn run_until_idle(&mut self) {
        while self.step().await {}
    }

    /// Drive until `done` holds for the program. Returns `false` if the
    /// program went idle first.
    pub async fn run_until(&mut self, mut done: impl FnMut(&P) -> bool) -> bool {
        loop {
            if done(&self.program) {
                return true;
            }
            if !self.step().await {
                return done(&self.program);
            }
        }
    }

    pub fn into_program(self) -> P {
        self.program
    }
}

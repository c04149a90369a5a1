use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use derive_more::{Display, Error, From};

use crate::result::Maybe::{self, Absent, Present};
use crate::result::Outcome::{self, Failure, Success};
use crate::util::result::ResultExtension;

/// The operating system refused to start a thread for a task.
#[derive(Debug, Display, Error, From)]
#[display("failed to spawn a task thread: {_0}")]
pub struct SpawnError(io::Error);

/// A task's function panicked instead of returning. Holds the panic payload.
#[derive(Debug, Error)]
pub struct TaskPanicked {
    #[error(not(source))]
    payload: Box<dyn Any + Send>,
}

impl TaskPanicked {
    /// Returns the panic message, if the payload was a string.
    pub fn message(&self) -> Maybe<&str> {
        if let Some(message) = self.payload.downcast_ref::<&'static str>() {
            Present(*message)
        } else if let Some(message) = self.payload.downcast_ref::<String>() {
            Present(message.as_str())
        } else {
            Absent
        }
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Display for TaskPanicked {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.message() {
            Present(message) => write!(f, "task panicked: {message}"),
            Absent => write!(f, "task panicked"),
        }
    }
}

/// A function running on its own OS thread, whose result can be collected later.
///
/// Dropping a Later that hasn't been joined waits for its function to finish. Use
/// [`detach`](Later::detach) to let it run on unobserved instead.
///
/// # Examples
/// ```
/// # use owned_std::task::Later;
/// let task = Later::run(|| (1..=10).sum::<u32>());
/// assert_eq!(task.join().unwrap(), 55);
/// ```
pub struct Later<R> {
    handle: Maybe<JoinHandle<R>>,
}

impl<R: Send + 'static> Later<R> {
    /// Starts running `f` on a new thread.
    ///
    /// # Panics
    /// Raises a fatal assertion if the thread can't be spawned.
    #[track_caller]
    pub fn run<F: FnOnce() -> R + Send + 'static>(f: F) -> Later<R> {
        Later::try_run(f).throw()
    }

    /// Starts running `f` on a new thread.
    ///
    /// # Errors
    /// Fails if the operating system refuses to create the thread.
    pub fn try_run<F: FnOnce() -> R + Send + 'static>(f: F) -> Outcome<Later<R>, SpawnError> {
        let handle = thread::Builder::new().name(String::from("later")).spawn(f)?;
        log::trace!("spawned task thread {:?}", handle.thread().id());
        Success(Later {
            handle: Present(handle),
        })
    }
}

impl<R> Later<R> {
    /// Returns true once the function has returned or panicked. Never blocks.
    pub fn done(&self) -> bool {
        match &self.handle {
            Present(handle) => handle.is_finished(),
            Absent => true,
        }
    }

    /// Blocks until the function finishes, then returns its result.
    ///
    /// # Errors
    /// Fails with the panic payload if the function panicked.
    pub fn join(mut self) -> Outcome<R, TaskPanicked> {
        match self.handle.take() {
            Present(handle) => handle.join().map_err(|payload| TaskPanicked { payload }).into(),
            // The handle is only taken by methods that consume self.
            Absent => Failure(TaskPanicked {
                payload: Box::new("task was already joined"),
            }),
        }
    }

    /// Lets the function run to completion unobserved. Its result is dropped on its own thread.
    pub fn detach(mut self) {
        if let Present(handle) = self.handle.take() {
            log::trace!("detached task thread {:?}", handle.thread().id());
        }
    }
}

impl<R> Drop for Later<R> {
    fn drop(&mut self) {
        if let Present(handle) = self.handle.take()
            && let Err(error) = handle.join()
        {
            log::warn!("{}", TaskPanicked { payload: error });
        }
    }
}

impl<R> Debug for Later<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Later").field("done", &self.done()).finish()
    }
}

/// Starts a task that sleeps for `delay` and then runs `f`.
///
/// # Panics
/// Raises a fatal assertion if the thread can't be spawned.
///
/// # Examples
/// ```
/// # use std::time::{Duration, Instant};
/// # use owned_std::task::execute_after;
/// let start = Instant::now();
/// let task = execute_after(Duration::from_millis(20), move || start.elapsed());
/// assert!(task.join().unwrap() >= Duration::from_millis(20));
/// ```
#[track_caller]
pub fn execute_after<R, F>(delay: Duration, f: F) -> Later<R>
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    Later::run(move || {
        thread::sleep(delay);
        f()
    })
}

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::{self, Display, Formatter};
use std::panic::Location;
use std::thread::{self, ThreadId};

/// Everything known about a fatal assertion at the point it was raised.
#[derive(Debug)]
pub struct FatalReport {
    message: String,
    expression: Option<&'static str>,
    location: &'static Location<'static>,
    thread_id: ThreadId,
    thread_name: Option<String>,
    backtrace: Backtrace,
}

impl FatalReport {
    /// Captures a report for the caller's location on the current thread.
    ///
    /// With the `abort-on-fatal` feature the backtrace is always captured, otherwise capture
    /// follows the `RUST_LIB_BACKTRACE` and `RUST_BACKTRACE` environment variables.
    #[track_caller]
    pub fn capture(message: String, expression: Option<&'static str>) -> FatalReport {
        let current = thread::current();
        FatalReport {
            message,
            expression,
            location: Location::caller(),
            thread_id: current.id(),
            thread_name: current.name().map(str::to_owned),
            backtrace: if cfg!(feature = "abort-on-fatal") {
                Backtrace::force_capture()
            } else {
                Backtrace::capture()
            },
        }
    }

    /// Returns the formatted message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn expression(&self) -> Option<&'static str> {
        self.expression
    }

    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub const fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    pub const fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Logs the report and ends the current thread by unwinding, or the process when
    /// `abort-on-fatal` is enabled.
    #[track_caller]
    pub fn raise(self) -> ! {
        log::error!(target: "owned_std::fatal", "{self}");

        if cfg!(feature = "abort-on-fatal") {
            eprintln!("{self}");
            std::process::abort();
        }

        panic!("{self}")
    }
}

impl Display for FatalReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.backtrace.status() == BacktraceStatus::Captured {
            writeln!(f, "{}", self.backtrace)?;
            writeln!(f, "----- INFO -----")?;
        }

        writeln!(f, "({})", self.location)?;

        write!(f, "fatal on thread ({:?}", self.thread_id)?;
        if let Some(name) = &self.thread_name {
            write!(f, ", {name}")?;
        }
        writeln!(f, ")")?;

        if let Some(expression) = self.expression {
            writeln!(f, "the expression \"{expression}\" failed.")?;
        }
        write!(f, "message: {}", self.message)
    }
}

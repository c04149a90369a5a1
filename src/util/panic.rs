#[cfg(not(feature = "abort-on-fatal"))]
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
        println!("^ panic caught");
    };
}

// Fatal assertions abort the test binary with this feature, so there is nothing to catch.
#[cfg(feature = "abort-on-fatal")]
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {};
    ($run:block, $msg:literal) => {};
}

#[allow(unused_imports)]
pub(crate) use assert_panics;

/// Asserts that evaluating the given block panics, swallowing the unwind. The optional message
/// is reported when the block completes normally instead of panicking.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "the block completed without panicking")
    };
    ($run:block, $msg:literal) => {
        assert!(std::panic::catch_unwind(|| $run).is_err(), $msg);
        println!("^ expected panic, caught");
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;

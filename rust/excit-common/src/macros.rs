/// Unwraps an operation result inside `Iterator::next` of an adapter whose
/// items are `Result`s.
///
/// `Ok(value)` evaluates to `value`; `Err(err)` makes the surrounding `next`
/// return `Some(Err(err))`, so a failed step surfaces as an item instead of
/// silently ending the iteration.
#[macro_export]
macro_rules! try_or_ret_some_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        }
    };
}

pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Rejects a caller-supplied parameter that can never be valid, such as a zero
/// step or a zero window, with `InvalidArgument`.
///
/// The condition text becomes the error message:
/// `verify_arg!(step, step != 0)` fails with "invalid argument step: step != 0".
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let holds = $expr;
        $crate::result::verify_arg(holds, stringify!($name), stringify!($expr))?;
    }};
}

/// Rejects a value that is well-formed but falls outside the iteration space
/// (a rank past the end, a split into zero pieces) with `OutOfDomain`.
#[macro_export]
macro_rules! verify_domain {
    ($name:expr, $expr:expr) => {{
        let holds = $expr;
        $crate::result::verify_domain(holds, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(holds: bool, name: &str, condition: &str) -> Result<()> {
    if holds { Ok(()) } else { invalid_arg(name, condition) }
}

#[inline]
pub fn verify_domain(holds: bool, name: &str, condition: &str) -> Result<()> {
    if holds { Ok(()) } else { out_of_domain(name, condition) }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::Error::invalid_arg(name, condition))
}

#[cold]
pub fn out_of_domain(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::Error::out_of_domain(name, condition))
}

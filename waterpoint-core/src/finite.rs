//! Serde adapter refusing non-finite floats.
//!
//! `serde_json` writes NaN and infinities as `null`, which does not load back
//! as `f64`.

use serde::Serializer;
use serde::ser::Error;

pub(crate) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "cannot persist non-finite number {value}"
        )));
    }
    serializer.serialize_f64(*value)
}

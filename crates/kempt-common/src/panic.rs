//! Helpers for panics contained at callback and plugin boundaries.

use std::any::Any;

/// Best-effort text of a panic payload caught with `catch_unwind`.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_panic_message_from_str_and_string() {
        let payload = catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let value = 7;
        let payload = catch_unwind(AssertUnwindSafe(|| panic!("formatted {value}"))).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 7");
    }
}

use std::fmt::Debug;

use anchor_lang::error::Error;
use anchor_lang::Result;

use crate::errors::DispenserError;

#[track_caller]
pub fn assert_error<T: Debug>(result: Result<T>, expected: DispenserError) {
    match result {
        Err(Error::AnchorError(err)) => assert_eq!(
            err.error_code_number,
            u32::from(expected),
            "expected {:?}, got {}",
            expected,
            err.error_name
        ),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

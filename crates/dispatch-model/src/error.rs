// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use thiserror::Error;

/// Validation errors raised while building an optimization instance.
///
/// All variants are fatal to the invocation that raised them: validation
/// runs before any solving begins and no partial result is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A ticket ID repeats within the ticket list.
    #[error("duplicate ticket id '{0}'")]
    DuplicateTicketId(String),

    /// A technician ID repeats within the technician list.
    #[error("duplicate technician id '{0}'")]
    DuplicateTechnicianId(String),

    /// A ticket's required resolution time is not finite and positive.
    #[error("ticket '{id}' has invalid time_required {value}: must be finite and positive")]
    InvalidTimeRequired { id: String, value: f64 },

    /// A technician's remaining capacity is not finite and non-negative.
    #[error("technician '{id}' has invalid capacity {value}: must be finite and non-negative")]
    InvalidCapacity { id: String, value: f64 },
}

/// Convenience alias for model-layer results.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_record() {
        let err = ModelError::DuplicateTicketId("TKT-7".to_string());
        assert_eq!(format!("{}", err), "duplicate ticket id 'TKT-7'");

        let err = ModelError::InvalidCapacity {
            id: "TECH-1".to_string(),
            value: -2.0,
        };
        let message = format!("{}", err);
        assert!(message.contains("TECH-1"));
        assert!(message.contains("-2"));
    }
}

//! Row-by-row execution of scalar functions over argument columns.
//!
//! A row with a NULL in any argument produces NULL without calling the
//! function. The first error stops the batch; rows after it are never run.

use crate::error::FunctionError;

pub fn execute_unary<F>(
    input: &[Option<&str>],
    mut f: F,
) -> Result<Vec<Option<String>>, FunctionError>
where
    F: FnMut(&str) -> Result<String, FunctionError>,
{
    input
        .iter()
        .map(|row| row.map(&mut f).transpose())
        .collect()
}

pub fn execute_ternary<F>(
    a: &[Option<&str>],
    b: &[Option<&str>],
    c: &[Option<&str>],
    mut f: F,
) -> Result<Vec<Option<String>>, FunctionError>
where
    F: FnMut(&str, &str, &str) -> Result<String, FunctionError>,
{
    if a.len() != b.len() || a.len() != c.len() {
        return Err(FunctionError::BatchShape(vec![a.len(), b.len(), c.len()]));
    }
    a.iter()
        .zip(b)
        .zip(c)
        .map(|((a, b), c)| match (*a, *b, *c) {
            (Some(a), Some(b), Some(c)) => f(a, b, c).map(Some),
            _ => Ok(None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn fail(status: u16) -> FunctionError {
        FunctionError::Status {
            method: HttpMethod::Get,
            status,
            reason: String::new(),
        }
    }

    #[test]
    fn unary_maps_rows_in_order() {
        let out = execute_unary(&[Some("a"), None, Some("c")], |s| Ok(s.to_uppercase())).unwrap();
        assert_eq!(out, vec![Some("A".to_string()), None, Some("C".to_string())]);
    }

    #[test]
    fn unary_stops_at_first_error() {
        let mut calls = 0;
        let err = execute_unary(&[Some("ok"), Some("bad"), Some("ok")], |s| {
            calls += 1;
            if s == "bad" {
                Err(fail(500))
            } else {
                Ok(s.to_string())
            }
        })
        .unwrap_err();
        assert_eq!(err, fail(500));
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_batch() {
        let out = execute_unary(&[], |s| Ok(s.to_string())).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn ternary_propagates_nulls() {
        let out = execute_ternary(
            &[Some("u"), Some("u"), None],
            &[Some("h"), None, Some("h")],
            &[Some("b"), Some("b"), Some("b")],
            |a, b, c| Ok(format!("{a}{b}{c}")),
        )
        .unwrap();
        assert_eq!(out, vec![Some("uhb".to_string()), None, None]);
    }

    #[test]
    fn ternary_rejects_mismatched_columns() {
        let err = execute_ternary(&[Some("u")], &[], &[Some("b")], |_, _, _| Ok(String::new()))
            .unwrap_err();
        assert_eq!(err, FunctionError::BatchShape(vec![1, 0, 1]));
    }
}

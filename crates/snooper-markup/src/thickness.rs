//! Thickness shorthand.
//!
//! A thickness is written as four comma-separated numbers `left,top,right,bottom`.
//! Markup accepts shorter forms: one number for a uniform thickness, two for
//! `horizontal,vertical`. [`simplify_thickness`] picks the shortest form that
//! means the same thing.

/// Collapses `L,T,R,B` to `L` when all four are equal, or to `L,T` when
/// `L == R` and `T == B`. Any other input is returned unchanged.
///
/// Collapsed numbers are written in their shortest decimal form, so
/// `4.0`, `+4` and `4e0` all come out as `4`.
///
/// # Example
///
/// ```rust
/// use snooper_markup::simplify_thickness;
///
/// assert_eq!(simplify_thickness("4,4,4,4"), "4");
/// assert_eq!(simplify_thickness("2,5,2,5"), "2,5");
/// assert_eq!(simplify_thickness("1,2,3,4"), "1,2,3,4");
/// assert_eq!(simplify_thickness("-1,-1,-1,-1"), "-1");
/// ```
pub fn simplify_thickness(value: &str) -> String {
    let Some(components) = parse_components(value) else {
        return value.to_string();
    };
    let [l, t, r, b] = components;

    if l == t && l == r && l == b {
        canonical(l)
    } else if l == r && t == b {
        format!("{},{}", canonical(l), canonical(t))
    } else {
        value.to_string()
    }
}

/// Splits into exactly four finite numbers.
fn parse_components(value: &str) -> Option<[f64; 4]> {
    let mut parts = value.split(',');
    let mut components = [0.0; 4];
    for slot in &mut components {
        let text = parts.next()?.trim();
        let number: f64 = text.parse().ok()?;
        if !number.is_finite() {
            return None;
        }
        *slot = number;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(components)
}

fn canonical(number: f64) -> String {
    // Adding zero turns -0 into 0.
    (number + 0.0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_collapses_to_one() {
        assert_eq!(simplify_thickness("4,4,4,4"), "4");
        assert_eq!(simplify_thickness("0,0,0,0"), "0");
        assert_eq!(simplify_thickness("1.5,1.5,1.5,1.5"), "1.5");
    }

    #[test]
    fn test_symmetric_collapses_to_two() {
        assert_eq!(simplify_thickness("2,5,2,5"), "2,5");
        assert_eq!(simplify_thickness("10,-3,10,-3"), "10,-3");
    }

    #[test]
    fn test_asymmetric_unchanged() {
        assert_eq!(simplify_thickness("1,2,3,4"), "1,2,3,4");
        assert_eq!(simplify_thickness("1,1,1,2"), "1,1,1,2");
    }

    #[test]
    fn test_negative_uniform() {
        assert_eq!(simplify_thickness("-1,-1,-1,-1"), "-1");
    }

    #[test]
    fn test_sign_is_normalized() {
        assert_eq!(simplify_thickness("+4,4,4,4"), "4");
        assert_eq!(simplify_thickness("3,+2,3,2"), "3,2");
    }

    #[test]
    fn test_collapsed_value_is_canonical() {
        assert_eq!(simplify_thickness("-0,0,0,0"), "0");
        assert_eq!(simplify_thickness("1e0,1,1,1"), "1");
        assert_eq!(simplify_thickness("4.0,4,4,4"), "4");
        assert_eq!(simplify_thickness("0.50,2,0.5,2"), "0.5,2");
    }

    #[test]
    fn test_multi_digit_values() {
        assert_eq!(simplify_thickness("12,12,12,12"), "12");
        assert_eq!(simplify_thickness("12,1,12,1"), "12,1");
    }

    #[test]
    fn test_exact_comparison_without_tolerance() {
        assert_eq!(simplify_thickness("1,1,1,1.0000001"), "1,1,1,1.0000001");
    }

    #[test]
    fn test_not_a_thickness_unchanged() {
        assert_eq!(simplify_thickness("Auto"), "Auto");
        assert_eq!(simplify_thickness("1,1,1"), "1,1,1");
        assert_eq!(simplify_thickness("1,1,1,1,1"), "1,1,1,1,1");
        assert_eq!(simplify_thickness("a,a,a,a"), "a,a,a,a");
        assert_eq!(simplify_thickness("NaN,NaN,NaN,NaN"), "NaN,NaN,NaN,NaN");
        assert_eq!(simplify_thickness(""), "");
    }
}

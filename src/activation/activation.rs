/// Logistic sigmoid, 1 / (1 + e^-x).
///
/// Branches on the sign so that `exp` only ever sees a non-positive argument;
/// large |x| saturate to 0.0 / 1.0 instead of producing NaN.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Softplus, ln(1 + e^x), computed as max(x, 0) + ln(1 + e^-|x|).
pub fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// 소수점 `decimals` 자리로 반올림한다.
///
/// 웹 계산기와 같은 결과를 내기 위해 .5는 항상 +무한대 방향으로 올린다
/// (`f64::round`는 0에서 멀어지는 방향이라 음수에서 값이 달라진다).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// 정수 단위 반올림 (kWh, m³, kg 등).
pub fn round0(value: f64) -> f64 {
    round_to(value, 0)
}

/// 소수 1자리 (kW, 년, %).
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// 소수 2자리 (금액).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_rounds_toward_positive_infinity() {
        assert_eq!(round0(2.5), 3.0);
        assert_eq!(round0(-2.5), -2.0);
        assert_eq!(round1(0.25), 0.3);
    }

    #[test]
    fn money_keeps_two_decimals() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(-75.004), -75.0);
    }
}

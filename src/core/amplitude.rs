//! Pure amplitude math: scaling, midpoint, and in-place record rewriting.

use crate::utils::error::{EtlError, Result};
use serde_json::Value;

pub const DEFAULT_SCALE_FACTOR: f64 = 0.75;
pub const DEFAULT_AMPLITUDE_FIELD: &str = "amplitudes";
pub const DEFAULT_MIDPOINT_FIELD: &str = "midpoint";

#[derive(Debug, Clone, PartialEq)]
pub enum RescaleOutcome {
    Rescaled { midpoint: f64, samples: usize },
    MissingAmplitudes,
}

/// Multiplies every element by `factor`. Every element must be a JSON number.
pub fn scale_amplitudes(values: &[Value], factor: f64) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let number = value
                .as_f64()
                .ok_or_else(|| EtlError::NonNumericAmplitude {
                    index,
                    value: value.to_string(),
                })?;
            let scaled = number * factor;
            if scaled.is_finite() {
                Ok(scaled)
            } else {
                Err(EtlError::NonFiniteAmplitude { index })
            }
        })
        .collect()
}

/// Average of the largest and smallest value, `None` when empty.
///
/// Halves before adding so that two finite extremes never sum to infinity.
pub fn midpoint(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some(max / 2.0 + min / 2.0)
}

/// Scales the amplitude array of `data` and stores the midpoint next to it.
///
/// `data` is only mutated once every amplitude has been validated, so a
/// failing record is left exactly as it was.
pub fn rescale_value(
    data: &mut Value,
    factor: f64,
    amplitude_field: &str,
    midpoint_field: &str,
) -> Result<RescaleOutcome> {
    let Some(object) = data.as_object_mut() else {
        return Ok(RescaleOutcome::MissingAmplitudes);
    };
    let Some(Value::Array(amplitudes)) = object.get(amplitude_field) else {
        return Ok(RescaleOutcome::MissingAmplitudes);
    };

    let scaled = scale_amplitudes(amplitudes, factor)?;
    let mid = midpoint(&scaled).ok_or(EtlError::EmptyAmplitudes)?;
    let samples = scaled.len();

    object.insert(
        amplitude_field.to_string(),
        Value::Array(scaled.into_iter().map(Value::from).collect()),
    );
    object.insert(midpoint_field.to_string(), Value::from(mid));

    Ok(RescaleOutcome::Rescaled {
        midpoint: mid,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rescale(data: &mut Value) -> Result<RescaleOutcome> {
        rescale_value(
            data,
            DEFAULT_SCALE_FACTOR,
            DEFAULT_AMPLITUDE_FIELD,
            DEFAULT_MIDPOINT_FIELD,
        )
    }

    #[test]
    fn test_scale_amplitudes_mixes_integers_and_floats() {
        let values = vec![json!(4), json!(-8), json!(2.0)];
        let scaled = scale_amplitudes(&values, 0.75).unwrap();
        assert_eq!(scaled, vec![3.0, -6.0, 1.5]);
    }

    #[test]
    fn test_scale_amplitudes_rejects_non_numbers() {
        let values = vec![json!(1), json!("2"), json!(3)];
        match scale_amplitudes(&values, 0.75) {
            Err(EtlError::NonNumericAmplitude { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "\"2\"");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(scale_amplitudes(&[json!(null)], 0.75).is_err());
    }

    #[test]
    fn test_scale_amplitudes_rejects_overflow() {
        let values = vec![json!(f64::MAX)];
        assert!(matches!(
            scale_amplitudes(&values, 4.0),
            Err(EtlError::NonFiniteAmplitude { index: 0 })
        ));
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(&[3.0, -6.0, 1.5]), Some(-1.5));
        assert_eq!(midpoint(&[2.5]), Some(2.5));
        assert_eq!(midpoint(&[]), None);
    }

    #[test]
    fn test_midpoint_of_huge_extremes_stays_finite() {
        let mid = midpoint(&[1.7e308, 1.7e308]).unwrap();
        assert_eq!(mid, 1.7e308);

        let mid = midpoint(&[f64::MAX, -f64::MAX]).unwrap();
        assert_eq!(mid, 0.0);
    }

    #[test]
    fn test_rescale_value_huge_amplitudes_keep_numeric_midpoint() {
        let mut data = json!({"amplitudes": [1.7e308, 1.7e308]});

        let outcome = rescale(&mut data).unwrap();

        let expected = 1.7e308 * 0.75;
        assert_eq!(
            outcome,
            RescaleOutcome::Rescaled {
                midpoint: expected,
                samples: 2
            }
        );
        assert!(data["midpoint"].is_f64());
        assert_eq!(data["midpoint"].as_f64(), Some(expected));

        let serialized = serde_json::to_string(&data).unwrap();
        assert!(!serialized.contains("null"));
    }

    #[test]
    fn test_rescale_value_updates_record() {
        let mut data = json!({"name": "sinus", "amplitudes": [4, -8, 2], "period_count": 3});

        let outcome = rescale(&mut data).unwrap();

        assert_eq!(
            outcome,
            RescaleOutcome::Rescaled {
                midpoint: -1.5,
                samples: 3
            }
        );
        assert_eq!(data["amplitudes"], json!([3.0, -6.0, 1.5]));
        assert_eq!(data["midpoint"], json!(-1.5));
        assert_eq!(data["name"], json!("sinus"));

        let keys: Vec<&String> = data.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "amplitudes", "period_count", "midpoint"]);
    }

    #[test]
    fn test_rescale_value_overwrites_existing_midpoint_in_place() {
        let mut data = json!({"midpoint": 99, "amplitudes": [8, 0]});

        rescale(&mut data).unwrap();

        assert_eq!(data["midpoint"], json!(3.0));
        let keys: Vec<&String> = data.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["midpoint", "amplitudes"]);
    }

    #[test]
    fn test_rescale_value_missing_amplitudes() {
        let mut no_key = json!({"values": [1, 2]});
        let mut not_array = json!({"amplitudes": "1,2,3"});
        let mut not_object = json!([1, 2, 3]);

        for data in [&mut no_key, &mut not_array, &mut not_object] {
            let before = data.clone();
            assert_eq!(rescale(data).unwrap(), RescaleOutcome::MissingAmplitudes);
            assert_eq!(*data, before);
        }
    }

    #[test]
    fn test_rescale_value_leaves_invalid_record_untouched() {
        let mut empty = json!({"amplitudes": []});
        assert!(matches!(rescale(&mut empty), Err(EtlError::EmptyAmplitudes)));
        assert_eq!(empty, json!({"amplitudes": []}));

        let mut mixed = json!({"amplitudes": [1, true, 3]});
        assert!(rescale(&mut mixed).is_err());
        assert_eq!(mixed, json!({"amplitudes": [1, true, 3]}));
        assert!(mixed.get("midpoint").is_none());
    }

    #[test]
    fn test_rescale_value_custom_fields() {
        let mut data = json!({"values": [10, 20]});

        let outcome = rescale_value(&mut data, 0.5, "values", "center").unwrap();

        assert_eq!(
            outcome,
            RescaleOutcome::Rescaled {
                midpoint: 7.5,
                samples: 2
            }
        );
        assert_eq!(data, json!({"values": [5.0, 10.0], "center": 7.5}));
    }
}

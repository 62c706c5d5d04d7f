use hydrator::keys::{candidate_keys, separate_digits, underscored};
use hydrator::{hydratable, Hydrator};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

#[derive(Debug, Default, PartialEq)]
struct Point {
    x: i64,
    y: i64,
}

hydratable!(Point { x: i64, y: i64 } => |x, y| Point { x, y }, default => Point::default());

#[derive(Debug, Default, PartialEq)]
struct Reading {
    sensor: String,
    value: i64,
}

hydratable!(
    Reading { sensorId: String, sampleValue2: i64 } => |sensor, value| Reading { sensor, value },
    default => Reading::default()
);

#[derive(Debug, PartialEq)]
struct Empty;

hydratable!(Empty {} => || Empty);

/// camelCase identifiers such as `userId` or `lineItemCount3`
fn camel_identifier_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,8}",
        prop::collection::vec("[A-Z][a-z]{1,6}", 0..3),
        prop::option::of(0u32..100),
    )
        .prop_map(|(head, tail, digits)| {
            let mut name = head;
            for word in tail {
                name.push_str(&word);
            }
            if let Some(digits) = digits {
                name.push_str(&digits.to_string());
            }
            name
        })
}

fn raw_record_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-zA-Z_]{1,10}", any::<i64>().prop_map(Value::from), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    /// Property: snake_case conversion never leaves uppercase letters or separator runs
    #[test]
    fn underscored_output_is_lowercase_snake(name in camel_identifier_strategy()) {
        let snake = underscored(&name);
        prop_assert!(!snake.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(!snake.contains("__"));
        prop_assert_eq!(snake.replace('_', ""), name.to_lowercase());
    }

    /// Property: digit separation only ever inserts underscores
    #[test]
    fn separate_digits_only_inserts_underscores(name in camel_identifier_strategy()) {
        let snake = underscored(&name);
        let separated = separate_digits(&snake);
        prop_assert_eq!(separated.replace('_', ""), snake.replace('_', ""));
    }

    /// Property: candidates are snake, digit-separated snake, then the declared name
    #[test]
    fn candidate_keys_follow_priority_order(name in camel_identifier_strategy()) {
        let keys = candidate_keys(&name);
        let snake = underscored(&name);
        prop_assert_eq!(&keys.as_slice()[0], &snake);
        prop_assert_eq!(&keys.as_slice()[1], &separate_digits(&snake));
        prop_assert_eq!(&keys.as_slice()[2], &name);
    }

    /// Property: fully matched records construct with the matched values
    #[test]
    fn complete_records_round_trip(x in any::<i64>(), y in any::<i64>()) {
        let point: Point = Hydrator::new().hydrate(&json!({"x": x, "y": y})).unwrap();
        prop_assert_eq!(point, Point { x, y });
    }

    /// Property: any naming convention accepted by the heuristic resolves
    #[test]
    fn every_candidate_form_resolves(
        sensor in "[a-z]{1,12}",
        value in any::<i64>(),
        sensor_key in prop::sample::select(vec!["sensor_id", "sensorId"]),
        value_key in prop::sample::select(vec!["sample_value2", "sample_value_2", "sampleValue2"]),
    ) {
        let mut raw = Map::new();
        raw.insert(sensor_key.to_string(), json!(sensor.clone()));
        raw.insert(value_key.to_string(), json!(value));

        let reading: Reading = Hydrator::new().hydrate(&raw).unwrap();
        prop_assert_eq!(reading, Reading { sensor, value });
    }

    /// Property: a record missing any parameter gives the zero-argument instance
    #[test]
    fn records_missing_y_fall_back_to_default(raw in raw_record_strategy()) {
        prop_assume!(!raw.contains_key("y"));
        let point: Point = Hydrator::new().hydrate(&raw).unwrap();
        prop_assert_eq!(point, Point::default());
    }

    /// Property: nullary types hydrate from any record
    #[test]
    fn nullary_types_always_hydrate(raw in raw_record_strategy()) {
        prop_assert_eq!(Hydrator::new().hydrate::<Empty, _>(&raw).unwrap(), Empty);
    }

    /// Property: collections keep length and order
    #[test]
    fn collections_preserve_length_and_order(
        coordinates in prop::collection::vec((any::<i64>(), prop::option::of(any::<i64>())), 0..40)
    ) {
        let raws: Vec<Value> = coordinates
            .iter()
            .map(|(x, y)| match y {
                Some(y) => json!({"x": x, "y": y}),
                None => json!({"x": x}),
            })
            .collect();

        let points: Vec<Point> = Hydrator::new().hydrate_collection(&raws).unwrap();
        prop_assert_eq!(points.len(), raws.len());
        for (point, (x, y)) in points.iter().zip(&coordinates) {
            match y {
                Some(y) => {
                    prop_assert_eq!(point, &Point { x: *x, y: *y });
                }
                None => {
                    prop_assert_eq!(point, &Point::default());
                }
            }
        }
    }
}

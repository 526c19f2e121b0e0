//! Module to decode the state vectors returned by the Opensky `/states/all` endpoint.
//!
//! XXX they send out an array of arrays, each representing a specific state vector, with
//!     every field identified only by its position.
//!
//! We decode it by hand from a `serde_json::Value` instead of using a tuple struct because we
//! want to know precisely which record and which field is wrong.  The first error aborts the
//! whole snapshot.
//!
//! Documentation is taken from [The Opensky site](https://openskynetwork.github.io/opensky-api/rest.html)
//!

use std::fmt::{Display, Formatter};
use std::slice::Iter;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, trace};

use crate::{FormatError, SchemaError};

/// Number of positional fields in a state vector
pub const STATE_FIELDS: usize = 13;

/// Field names, indexed by position in the raw array
const FIELDS: [&str; STATE_FIELDS] = [
    "icao24",
    "callsign",
    "origin_country",
    "time_position",
    "last_contact",
    "longitude",
    "latitude",
    "altitude",
    "on_ground",
    "velocity",
    "true_track",
    "vertical_rate",
    "sensors",
];

const ON_GROUND: usize = 8;

/// This is the main container for packets sent by the API, a snapshot of every aircraft
/// reporting at `time`.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StateList {
    /// UNIX timestamp
    pub time: i64,
    /// The state vectors, in the order the server sent them
    pub states: Vec<StateVector>,
}

/// Definition of a state vector as sent by the API.
///
/// `icao24` and `origin_country` are always sent, a `null` there ends up as an empty string.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StateVector {
    /// ICAO ID (hex)
    pub icao24: String,
    /// Call-sign of the vehicle, usually padded with spaces
    pub callsign: Option<String>,
    /// Origin Country
    pub origin_country: String,
    /// Last position update
    pub time_position: Option<f64>,
    /// Last velocity update
    pub last_contact: Option<f64>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Barometric or geometric altitude in meters
    pub altitude: Option<f64>,
    pub on_ground: bool,
    /// Ground speed in m/s
    pub velocity: Option<f64>,
    /// Heading in degrees clockwise from north
    pub true_track: Option<f64>,
    /// m/s, positive when climbing
    pub vertical_rate: Option<f64>,
    /// Receivers IDs, only when filtering by sensor
    pub sensors: Option<Vec<i64>>,
}

impl StateList {
    /// Parse raw bytes as JSON then decode.
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &[u8]) -> Result<Self, FormatError> {
        trace!("statelist::from_json({} bytes)", input.len());

        let data: Value = serde_json::from_slice(input)?;
        Ok(Self::from_value(&data)?)
    }

    /// Decode the top-level document.
    ///
    /// A missing or `null` `states` means nobody is reporting, this is not an error.
    ///
    #[tracing::instrument(skip(data))]
    pub fn from_value(data: &Value) -> Result<Self, SchemaError> {
        trace!("statelist::from_value");

        let obj = data.as_object().ok_or_else(|| {
            SchemaError::MalformedDocument(format!("expected an object, got {}", kind(data)))
        })?;

        let time = obj
            .get("time")
            .and_then(Value::as_i64)
            .ok_or(SchemaError::InvalidField {
                index: None,
                field: "time",
                expected: "integer",
            })?;

        let states = match obj.get("states") {
            None | Some(Value::Null) => vec![],
            Some(Value::Array(list)) => list
                .iter()
                .enumerate()
                .map(|(index, raw)| StateVector::from_raw(index, raw))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SchemaError::MalformedDocument(format!(
                    "states must be an array, got {}",
                    kind(other)
                )))
            }
        };
        debug!("time={} {} states", time, states.len());

        Ok(StateList { time, states })
    }

    /// Encode back into the positional shape used by the API.
    ///
    pub fn to_value(&self) -> Value {
        let states: Vec<Value> = self.states.iter().map(StateVector::to_row).collect();
        let mut obj = Map::new();
        obj.insert("time".to_string(), json!(self.time));
        obj.insert("states".to_string(), Value::Array(states));
        Value::Object(obj)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, StateVector> {
        self.states.iter()
    }
}

impl<'a> IntoIterator for &'a StateList {
    type Item = &'a StateVector;
    type IntoIter = Iter<'a, StateVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl StateVector {
    /// Check that `raw` is an array of the right length then decode it.
    ///
    fn from_raw(index: usize, raw: &Value) -> Result<Self, SchemaError> {
        let row = raw.as_array().ok_or(SchemaError::InvalidField {
            index: Some(index),
            field: "state",
            expected: "array",
        })?;
        Self::from_row(index, row)
    }

    /// Decode one positional record, `index` is only used for error reporting.
    ///
    pub fn from_row(index: usize, row: &[Value]) -> Result<Self, SchemaError> {
        if row.len() != STATE_FIELDS {
            return Err(SchemaError::WrongLength {
                index,
                expected: STATE_FIELDS,
                got: row.len(),
            });
        }

        // Fields are decoded in position order so that the first bad one is reported.
        let f = Fields { index, row };
        Ok(StateVector {
            icao24: f.string(0)?.unwrap_or_default(),
            callsign: f.string(1)?,
            origin_country: f.string(2)?.unwrap_or_default(),
            time_position: f.number(3)?,
            last_contact: f.number(4)?,
            longitude: f.number(5)?,
            latitude: f.number(6)?,
            altitude: f.number(7)?,
            on_ground: f.boolean(ON_GROUND)?,
            velocity: f.number(9)?,
            true_track: f.number(10)?,
            vertical_rate: f.number(11)?,
            sensors: f.sensors(12)?,
        })
    }

    /// Encode as a positional array.
    ///
    pub fn to_row(&self) -> Value {
        json!([
            self.icao24,
            self.callsign,
            self.origin_country,
            self.time_position,
            self.last_contact,
            self.longitude,
            self.latitude,
            self.altitude,
            self.on_ground,
            self.velocity,
            self.true_track,
            self.vertical_rate,
            self.sensors,
        ])
    }
}

/// Typed accessors over one raw record; `null` maps to `None` except for `boolean`.
///
struct Fields<'a> {
    index: usize,
    row: &'a [Value],
}

impl Fields<'_> {
    fn invalid(&self, pos: usize, expected: &'static str) -> SchemaError {
        SchemaError::InvalidField {
            index: Some(self.index),
            field: FIELDS[pos],
            expected,
        }
    }

    fn string(&self, pos: usize) -> Result<Option<String>, SchemaError> {
        match &self.row[pos] {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(self.invalid(pos, "string")),
        }
    }

    fn boolean(&self, pos: usize) -> Result<bool, SchemaError> {
        self.row[pos]
            .as_bool()
            .ok_or_else(|| self.invalid(pos, "boolean"))
    }

    fn number(&self, pos: usize) -> Result<Option<f64>, SchemaError> {
        match &self.row[pos] {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.invalid(pos, "number")),
            _ => Err(self.invalid(pos, "number")),
        }
    }

    fn sensors(&self, pos: usize) -> Result<Option<Vec<i64>>, SchemaError> {
        match &self.row[pos] {
            Value::Null => Ok(None),
            Value::Array(list) => list
                .iter()
                .map(|v| v.as_i64().ok_or_else(|| self.invalid(pos, "array of integers")))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            _ => Err(self.invalid(pos, "array of integers")),
        }
    }
}

/// Name of the JSON type, for error messages
fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `-` for anything not sent
fn opt<T: Display>(v: &Option<T>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sensors = match &self.sensors {
            Some(s) => format!("{s:?}"),
            None => "-".to_string(),
        };
        write!(
            f,
            "Icao24 [{}] Callsign [{}] OriginCountry [{}] TimePosition [{}] \
            LastContact [{}] Longitude [{}] Latitude [{}] Altitude [{}] OnGround [{}] \
            Velocity [{}] Heading [{}] VerticalRate [{}] Sensors [{}]",
            self.icao24,
            self.callsign.as_deref().unwrap_or("-"),
            self.origin_country,
            opt(&self.time_position),
            opt(&self.last_contact),
            opt(&self.longitude),
            opt(&self.latitude),
            opt(&self.altitude),
            self.on_ground,
            opt(&self.velocity),
            opt(&self.true_track),
            opt(&self.vertical_rate),
            sensors,
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const SCENARIO: &str = r#"{"time": 1690000000, "states": [["abc123","CALLX  ","Germany",1690000000.0,1690000000.0,13.4,52.5,10000.0,false,230.5,90.0,0.0,[1,2]]]}"#;

    fn sample() -> StateVector {
        StateVector {
            icao24: "abc123".to_string(),
            callsign: Some("CALLX  ".to_string()),
            origin_country: "Germany".to_string(),
            time_position: Some(1690000000.0),
            last_contact: Some(1690000000.0),
            longitude: Some(13.4),
            latitude: Some(52.5),
            altitude: Some(10000.0),
            on_ground: false,
            velocity: Some(230.5),
            true_track: Some(90.0),
            vertical_rate: Some(0.0),
            sensors: Some(vec![1, 2]),
        }
    }

    fn sample_row() -> Vec<Value> {
        match sample().to_row() {
            Value::Array(row) => row,
            _ => unreachable!(),
        }
    }

    fn clear(sv: &mut StateVector, pos: usize) {
        match pos {
            0 => sv.icao24.clear(),
            1 => sv.callsign = None,
            2 => sv.origin_country.clear(),
            3 => sv.time_position = None,
            4 => sv.last_contact = None,
            5 => sv.longitude = None,
            6 => sv.latitude = None,
            7 => sv.altitude = None,
            9 => sv.velocity = None,
            10 => sv.true_track = None,
            11 => sv.vertical_rate = None,
            12 => sv.sensors = None,
            _ => panic!("not nullable"),
        }
    }

    #[test]
    fn test_statelist_scenario() {
        let list = StateList::from_json(SCENARIO.as_bytes()).unwrap();

        assert_eq!(1690000000, list.time);
        assert_eq!(1, list.len());
        let sv = &list.states[0];
        assert_eq!("abc123", sv.icao24);
        assert!(!sv.on_ground);
        assert_eq!(Some(vec![1, 2]), sv.sensors);
        assert_eq!(&sample(), sv);
    }

    #[rstest]
    #[case(r#"{"time": 1690000000, "states": null}"#)]
    #[case(r#"{"time": 1690000000}"#)]
    #[case(r#"{"time": 1690000000, "states": []}"#)]
    fn test_statelist_no_states(#[case] input: &str) {
        let list = StateList::from_json(input.as_bytes()).unwrap();

        assert_eq!(1690000000, list.time);
        assert!(list.is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(12)]
    #[case(14)]
    #[case(17)]
    fn test_statelist_wrong_length(#[case] len: usize) {
        let mut row = sample_row();
        row.resize(len, Value::Null);
        let data = json!({"time": 1, "states": [sample().to_row(), row]});

        let res = StateList::from_value(&data);
        assert_eq!(
            Err(SchemaError::WrongLength {
                index: 1,
                expected: STATE_FIELDS,
                got: len
            }),
            res
        );
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(json!("false"))]
    #[case(json!(0))]
    fn test_statelist_bad_on_ground(#[case] value: Value) {
        let mut row = sample_row();
        row[ON_GROUND] = value;
        let data = json!({"time": 1, "states": [row]});

        let res = StateList::from_value(&data);
        assert_eq!(
            Err(SchemaError::InvalidField {
                index: Some(0),
                field: "on_ground",
                expected: "boolean"
            }),
            res
        );
    }

    #[rstest]
    fn test_statelist_nullable(
        #[values(0, 1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12)] pos: usize,
    ) {
        let mut row = sample_row();
        row[pos] = Value::Null;
        let data = json!({"time": 1, "states": [row]});

        let list = StateList::from_value(&data).unwrap();

        let mut want = sample();
        clear(&mut want, pos);
        assert_eq!(vec![want], list.states);
    }

    #[rstest]
    #[case(1, json!(42), "callsign", "string")]
    #[case(0, json!(["abc"]), "icao24", "string")]
    #[case(6, json!("52.5"), "latitude", "number")]
    #[case(9, json!(true), "velocity", "number")]
    #[case(12, json!([1, 2.5]), "sensors", "array of integers")]
    #[case(12, json!("1,2"), "sensors", "array of integers")]
    fn test_statelist_invalid_field(
        #[case] pos: usize,
        #[case] value: Value,
        #[case] field: &str,
        #[case] expected: &str,
    ) {
        let mut row = sample_row();
        row[pos] = value;
        let data = json!({"time": 1, "states": [sample().to_row(), sample().to_row(), row]});

        match StateList::from_value(&data) {
            Err(SchemaError::InvalidField {
                index,
                field: f,
                expected: e,
            }) => {
                assert_eq!(Some(2), index);
                assert_eq!(field, f);
                assert_eq!(expected, e);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    #[case(json!("not an object"))]
    #[case(json!([1, 2, 3]))]
    #[case(json!({"time": 1, "states": "none"}))]
    #[case(json!({"time": 1, "states": {"a": 1}}))]
    fn test_statelist_malformed(#[case] data: Value) {
        let res = StateList::from_value(&data);
        assert!(matches!(res, Err(SchemaError::MalformedDocument(_))));
    }

    #[rstest]
    #[case(json!({"states": null}))]
    #[case(json!({"time": "1690000000", "states": null}))]
    #[case(json!({"time": 1690000000.5, "states": null}))]
    #[case(json!({"time": null}))]
    fn test_statelist_bad_time(#[case] data: Value) {
        let res = StateList::from_value(&data);
        assert_eq!(
            Err(SchemaError::InvalidField {
                index: None,
                field: "time",
                expected: "integer"
            }),
            res
        );
    }

    #[rstest]
    #[case(1, json!(42), "callsign")]
    #[case(0, json!(1), "icao24")]
    #[case(7, json!("high"), "altitude")]
    fn test_statelist_first_bad_field(
        #[case] pos: usize,
        #[case] value: Value,
        #[case] field: &str,
    ) {
        let mut row = sample_row();
        row[pos] = value;
        row[ON_GROUND] = Value::Null;
        row[12] = json!("bad");
        let data = json!({"time": 1, "states": [row]});

        match StateList::from_value(&data) {
            Err(SchemaError::InvalidField { field: f, .. }) => assert_eq!(field, f),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_statelist_state_not_array() {
        let data = json!({"time": 1, "states": [sample().to_row(), "abc123"]});

        let res = StateList::from_value(&data);
        assert!(matches!(
            res,
            Err(SchemaError::InvalidField {
                index: Some(1),
                field: "state",
                ..
            })
        ));
    }

    #[test]
    fn test_statelist_not_json() {
        let res = StateList::from_json(b"<html>502 Bad Gateway</html>");
        assert!(matches!(res, Err(FormatError::Parse(_))));
    }

    #[test]
    fn test_statelist_schema_through_json() {
        let res = StateList::from_json(br#""not an object""#);
        assert!(matches!(
            res,
            Err(FormatError::Schema(SchemaError::MalformedDocument(_)))
        ));
    }

    #[test]
    fn test_statelist_order_and_count() {
        let input = include_str!("../testdata/states-all.json");
        let list = StateList::from_json(input.as_bytes()).unwrap();

        assert_eq!(1700000000, list.time);
        assert_eq!(4, list.len());

        let ids: Vec<_> = list.iter().map(|sv| sv.icao24.as_str()).collect();
        assert_eq!(vec!["4b1816", "3c6444", "a808c4", "39de4f"], ids);

        let mut grounded = vec![];
        for sv in &list {
            if sv.on_ground {
                grounded.push(sv.icao24.as_str());
            }
        }
        assert_eq!(vec!["39de4f"], grounded);

        let ground = &list.states[3];
        assert!(ground.on_ground);
        assert_eq!(None, ground.callsign);
        assert_eq!(None, ground.altitude);
        assert_eq!(None, ground.sensors);
    }

    #[test]
    fn test_statelist_roundtrip() {
        let input = include_str!("../testdata/states-all.json");
        let list = StateList::from_json(input.as_bytes()).unwrap();

        let again = StateList::from_value(&list.to_value()).unwrap();
        assert_eq!(list, again);
    }

    #[test]
    fn test_statevector_display() {
        let str = sample().to_string();

        assert!(str.starts_with("Icao24 [abc123] Callsign [CALLX  ] OriginCountry [Germany]"));
        assert!(str.contains("OnGround [false]"));
        assert!(str.ends_with("Sensors [[1, 2]]"));

        let mut sv = sample();
        sv.sensors = None;
        sv.altitude = None;
        let str = sv.to_string();
        assert!(str.contains("Altitude [-]"));
        assert!(str.ends_with("Sensors [-]"));
    }
}

use crate::domain::ports::QueryEncoder;
use crate::utils::error::{FlightError, Result};
use crate::utils::validation::{validate_airport_code, validate_date, validate_range, Validate};
use serde::{Deserialize, Serialize};

/// Fixed UI token the provider expects next to the encoded filter.
pub const DEFAULT_TFU: &str = "EgQIABABIgA";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Transport-ready query parameters for one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Encoded search filter (`tfs`).
    pub filter: String,
    pub language: String,
    pub tfu: String,
    pub currency: String,
}

impl Query {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            tfu: DEFAULT_TFU.to_string(),
            currency: String::new(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builds a query from the encoder's blob, which must be UTF-8 text.
    pub fn from_encoded(blob: Vec<u8>) -> Result<Self> {
        let filter = String::from_utf8(blob).map_err(|e| FlightError::QueryEncoding {
            message: format!("encoded filter is not valid UTF-8: {}", e),
        })?;
        if filter.is_empty() {
            return Err(FlightError::QueryEncoding {
                message: "encoded filter is empty".to_string(),
            });
        }
        Ok(Self::new(filter))
    }

    pub fn params(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("tfs", self.filter.as_str()),
            ("hl", self.language.as_str()),
            ("tfu", self.tfu.as_str()),
            ("curr", self.currency.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    RoundTrip,
    OneWay,
    MultiCity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// `YYYY-MM-DD`
    pub date: String,
    pub from_airport: String,
    pub to_airport: String,
    pub max_stops: Option<u32>,
}

impl FlightLeg {
    pub fn new(date: &str, from_airport: &str, to_airport: &str) -> Self {
        Self {
            date: date.to_string(),
            from_airport: from_airport.to_string(),
            to_airport: to_airport.to_string(),
            max_stops: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passengers {
    pub adults: u32,
    pub children: u32,
    pub infants_in_seat: u32,
    pub infants_on_lap: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants_in_seat: 0,
            infants_on_lap: 0,
        }
    }
}

impl Passengers {
    pub const MAX_TOTAL: u32 = 9;

    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants_in_seat + self.infants_on_lap
    }
}

/// Structured search input handed to a [`QueryEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub flight_data: Vec<FlightLeg>,
    pub trip: TripType,
    pub passengers: Passengers,
    pub seat: SeatClass,
    pub max_stops: Option<u32>,
    #[serde(default)]
    pub currency: String,
}

impl SearchRequest {
    /// Validates, encodes and wraps the request into a [`Query`].
    pub fn to_query<E: QueryEncoder + ?Sized>(&self, encoder: &E) -> Result<Query> {
        self.validate()?;
        let blob = encoder.encode(self)?;
        Ok(Query::from_encoded(blob)?.with_currency(self.currency.clone()))
    }
}

impl Validate for SearchRequest {
    fn validate(&self) -> Result<()> {
        let legs = self.flight_data.len();
        let legs_ok = match self.trip {
            TripType::OneWay => legs == 1,
            TripType::RoundTrip => legs == 2,
            TripType::MultiCity => legs >= 2,
        };
        if !legs_ok {
            return Err(FlightError::ValidationError {
                message: format!("{:?} trip cannot have {} leg(s)", self.trip, legs),
            });
        }

        for (i, leg) in self.flight_data.iter().enumerate() {
            validate_date(&format!("flight_data[{}].date", i), &leg.date)?;
            validate_airport_code(&format!("flight_data[{}].from_airport", i), &leg.from_airport)?;
            validate_airport_code(&format!("flight_data[{}].to_airport", i), &leg.to_airport)?;
        }

        let p = &self.passengers;
        validate_range("passengers.total", p.total(), 1, Passengers::MAX_TOTAL)?;
        if p.infants_on_lap > p.adults {
            return Err(FlightError::ValidationError {
                message: "each infant on lap needs an adult".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Utf8Encoder;

    impl QueryEncoder for Utf8Encoder {
        fn encode(&self, request: &SearchRequest) -> Result<Vec<u8>> {
            let legs: Vec<String> = request
                .flight_data
                .iter()
                .map(|l| format!("{}{}{}", l.date, l.from_airport, l.to_airport))
                .collect();
            Ok(legs.join("|").into_bytes())
        }
    }

    fn one_way() -> SearchRequest {
        SearchRequest {
            flight_data: vec![FlightLeg::new("2026-11-20", "JFK", "LAX")],
            trip: TripType::OneWay,
            passengers: Passengers::default(),
            seat: SeatClass::Economy,
            max_stops: None,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_query_params_carry_defaults() {
        let query = Query::new("abc").with_currency("EUR");
        assert_eq!(
            query.params(),
            vec![("tfs", "abc"), ("hl", "en"), ("tfu", DEFAULT_TFU), ("curr", "EUR")]
        );
    }

    #[test]
    fn test_to_query_uses_encoder_and_currency() {
        let query = one_way().to_query(&Utf8Encoder).unwrap();
        assert_eq!(query.filter, "2026-11-20JFKLAX");
        assert_eq!(query.currency, "USD");
    }

    #[test]
    fn test_non_utf8_blob_is_rejected() {
        let err = Query::from_encoded(vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, FlightError::QueryEncoding { .. }));
    }

    #[test]
    fn test_leg_count_must_match_trip() {
        let mut request = one_way();
        request.trip = TripType::RoundTrip;
        assert!(request.validate().is_err());

        request.flight_data.push(FlightLeg::new("2026-11-27", "LAX", "JFK"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_passenger_limits() {
        let mut request = one_way();
        request.passengers = Passengers {
            adults: 1,
            children: 0,
            infants_in_seat: 0,
            infants_on_lap: 2,
        };
        assert!(request.validate().is_err());

        request.passengers = Passengers {
            adults: 8,
            children: 2,
            infants_in_seat: 0,
            infants_on_lap: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_date_is_rejected_before_encoding() {
        let mut request = one_way();
        request.flight_data[0].date = "next friday".to_string();
        assert!(matches!(
            request.to_query(&Utf8Encoder),
            Err(FlightError::ValidationError { .. })
        ));
    }
}

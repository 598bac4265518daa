use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Declares a survey answer with a fixed set of display labels.
///
/// The label doubles as the serde name and as the value the prediction model
/// was trained on, so it must match the model's vocabulary exactly.
macro_rules! choice {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice!(BodyType { Thin => "Thin", Average => "Average", Overweight => "Overweight" });
choice!(Sex { Male => "Male", Female => "Female" });
choice!(Diet { MeatEater => "Meat Eater", Vegetarian => "Vegetarian", Vegan => "Vegan" });
choice!(Shower { Daily => "Daily", FewTimesAWeek => "Few Times a Week", Rarely => "Rarely" });
choice!(Heating { Electricity => "Electricity", Gas => "Gas", Wood => "Wood", None => "None" });
choice!(Transport { Car => "Car", PublicTransport => "Public Transport", Cycle => "Cycle", Walk => "Walk" });
choice!(Vehicle { None => "None", Petrol => "Petrol", Diesel => "Diesel", Electric => "Electric" });
choice!(Level { Low => "Low", Medium => "Medium", High => "High" });
choice!(AirTravel { Never => "Never", Rarely => "Rarely", Often => "Often" });
choice!(BagSize { Small => "Small", Medium => "Medium", Large => "Large" });
choice!(YesNo { Yes => "Yes", No => "No" });
choice!(Cooking { Gas => "Gas", Electric => "Electric" });

/// Inclusive bounds of the numeric survey answers.
pub const GROCERY_RANGE: (u32, u32) = (100, 50_000);
pub const DISTANCE_RANGE: (u32, u32) = (0, 10_000);
pub const BAG_COUNT_RANGE: (u32, u32) = (0, 50);
pub const DAILY_HOURS_RANGE: (u32, u32) = (0, 24);
pub const CLOTHES_RANGE: (u32, u32) = (0, 100);

/// Column names expected by the deployed model, in payload order.
pub const MODEL_FIELDS: [&str; 19] = [
    "Body Type",
    "Sex",
    "Diet",
    "How Often Shower",
    "Heating Energy Source",
    "Transport",
    "Vehicle Type",
    "Social Activity",
    "Monthly Grocery Bill",
    "Frequency of Traveling by Air",
    "Vehicle Monthly Distance Km",
    "Waste Bag Size",
    "Waste Bag Weekly Count",
    "How Long TV PC Daily Hour",
    "How Many New Clothes Monthly",
    "How Long Internet Daily Hour",
    "Energy efficiency",
    "Recycling",
    "Cooking_With",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub body_type: BodyType,
    pub sex: Sex,
    pub diet: Diet,
    pub shower: Shower,
    pub social: Level,
    pub energy_efficiency: YesNo,
    pub recycling: YesNo,
    pub heating: Heating,
    pub cooking: Cooking,
    pub tv_hours: u32,
    pub internet: u32,
    pub grocery: u32,
    pub clothes: u32,
    pub transport: Transport,
    pub vehicle: Vehicle,
    pub distance: u32,
    pub flights: AirTravel,
    pub bag_size: BagSize,
    pub bag_count: u32,
}

impl Default for Survey {
    fn default() -> Self {
        Self {
            body_type: BodyType::Thin,
            sex: Sex::Male,
            diet: Diet::MeatEater,
            shower: Shower::Daily,
            social: Level::Low,
            energy_efficiency: YesNo::Yes,
            recycling: YesNo::Yes,
            heating: Heating::Electricity,
            cooking: Cooking::Gas,
            tv_hours: 4,
            internet: 6,
            grocery: 5000,
            clothes: 5,
            transport: Transport::Car,
            vehicle: Vehicle::None,
            distance: 500,
            flights: AirTravel::Never,
            bag_size: BagSize::Small,
            bag_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("Monthly grocery bill seems unrealistic")]
    GroceryUnrealistic,
    #[error("Monthly vehicle distance seems unrealistic")]
    DistanceUnrealistic,
    #[error("Waste bags per week seems unrealistic")]
    BagCountUnrealistic,
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}

impl Survey {
    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.grocery > GROCERY_RANGE.1 {
            return Err(SurveyError::GroceryUnrealistic);
        }
        if self.distance > DISTANCE_RANGE.1 {
            return Err(SurveyError::DistanceUnrealistic);
        }
        if self.bag_count > BAG_COUNT_RANGE.1 {
            return Err(SurveyError::BagCountUnrealistic);
        }

        check_range("Monthly Grocery Bill", self.grocery, GROCERY_RANGE)?;
        check_range("TV/PC Hours per Day", self.tv_hours, DAILY_HOURS_RANGE)?;
        check_range("Internet Hours per Day", self.internet, DAILY_HOURS_RANGE)?;
        check_range("New Clothes per Month", self.clothes, CLOTHES_RANGE)?;
        Ok(())
    }

    /// Answers in the order of [`MODEL_FIELDS`].
    pub fn model_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.body_type.label()),
            Value::from(self.sex.label()),
            Value::from(self.diet.label()),
            Value::from(self.shower.label()),
            Value::from(self.heating.label()),
            Value::from(self.transport.label()),
            Value::from(self.vehicle.label()),
            Value::from(self.social.label()),
            Value::from(self.grocery),
            Value::from(self.flights.label()),
            Value::from(self.distance),
            Value::from(self.bag_size.label()),
            Value::from(self.bag_count),
            Value::from(self.tv_hours),
            Value::from(self.clothes),
            Value::from(self.internet),
            Value::from(self.energy_efficiency.label()),
            Value::from(self.recycling.label()),
            Value::from(self.cooking.label()),
        ]
    }
}

fn check_range(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), SurveyError> {
    if value < min || value > max {
        return Err(SurveyError::OutOfRange { field, min, max });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceReport {
    pub category: String,
    pub kg: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub footprint_kg: f64,
    pub eco_score: f64,
    pub rating: String,
    pub tip: String,
    pub breakdown: Vec<SliceReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_survey_is_valid() {
        assert_eq!(Survey::default().validate(), Ok(()));
    }

    #[test]
    fn unrealistic_answers_are_checked_first() {
        let survey = Survey {
            grocery: 60_000,
            distance: 20_000,
            ..Survey::default()
        };
        assert_eq!(survey.validate(), Err(SurveyError::GroceryUnrealistic));

        let survey = Survey {
            bag_count: 51,
            tv_hours: 30,
            ..Survey::default()
        };
        assert_eq!(survey.validate(), Err(SurveyError::BagCountUnrealistic));
    }

    #[test]
    fn lower_and_hour_bounds_are_enforced() {
        let survey = Survey {
            grocery: 50,
            ..Survey::default()
        };
        assert_eq!(
            survey.validate().unwrap_err().to_string(),
            "Monthly Grocery Bill must be between 100 and 50000"
        );

        let survey = Survey {
            internet: 25,
            ..Survey::default()
        };
        assert!(matches!(
            survey.validate(),
            Err(SurveyError::OutOfRange { field: "Internet Hours per Day", .. })
        ));
    }

    #[test]
    fn model_values_follow_field_order() {
        let survey = Survey {
            diet: Diet::Vegan,
            cooking: Cooking::Electric,
            ..Survey::default()
        };
        let values = survey.model_values();
        assert_eq!(values.len(), MODEL_FIELDS.len());
        assert_eq!(values[2], Value::from("Vegan"));
        assert_eq!(values[8], Value::from(5000));
        assert_eq!(values[10], Value::from(500));
        assert_eq!(values[18], Value::from("Electric"));
    }

    #[test]
    fn survey_reads_model_labels() {
        let survey: Survey = serde_json::from_value(serde_json::json!({
            "body_type": "Overweight",
            "sex": "Female",
            "diet": "Meat Eater",
            "shower": "Few Times a Week",
            "social": "High",
            "energy_efficiency": "No",
            "recycling": "Yes",
            "heating": "None",
            "cooking": "Gas",
            "tv_hours": 2,
            "internet": 3,
            "grocery": 1200,
            "clothes": 1,
            "transport": "Public Transport",
            "vehicle": "None",
            "distance": 0,
            "flights": "Often",
            "bag_size": "Large",
            "bag_count": 4
        }))
        .expect("survey");
        assert_eq!(survey.shower, Shower::FewTimesAWeek);
        assert_eq!(survey.transport, Transport::PublicTransport);
        assert_eq!(survey.heating.label(), "None");
    }
}

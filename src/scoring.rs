use crate::models::{PredictionReport, SliceReport, Survey};

/// Footprints below this are rated excellent.
pub const EXCELLENT_THRESHOLD: f64 = 3000.0;
/// Footprints below this (and not excellent) are rated average.
pub const AVERAGE_THRESHOLD: f64 = 7000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Transport,
    Food,
    Energy,
    Waste,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Transport,
        Category::Food,
        Category::Energy,
        Category::Waste,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Energy => "Energy",
            Category::Waste => "Waste",
        }
    }
}

/// Rough annual kg CO₂ per category, used only to shape the pie chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakdown {
    pub transport: f64,
    pub food: f64,
    pub energy: f64,
    pub waste: f64,
}

impl Breakdown {
    pub fn from_inputs(distance: u32, grocery: u32, tv_hours: u32, bag_count: u32) -> Self {
        Self {
            transport: f64::from(distance) * 0.21 * 12.0,
            food: f64::from(grocery) * 0.002 * 12.0,
            energy: f64::from(tv_hours) * 0.5 * 365.0,
            waste: f64::from(bag_count) * 2.5 * 52.0,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Food => self.food,
            Category::Energy => self.energy,
            Category::Waste => self.waste,
        }
    }

    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Percentage per category in [`Category::ALL`] order, or `None` when
    /// nothing was emitted.
    pub fn shares(&self) -> Option<[f64; 4]> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        Some(Category::ALL.map(|c| self.get(c) / total * 100.0))
    }
}

pub fn breakdown(survey: &Survey) -> Breakdown {
    Breakdown::from_inputs(survey.distance, survey.grocery, survey.tv_hours, survey.bag_count)
}

/// 100 at zero emissions, dropping one point per 100 kg until it floors at 0.
pub fn eco_score(footprint: f64) -> f64 {
    if footprint.is_nan() {
        return 0.0;
    }
    (100.0 - footprint / 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Average,
    High,
}

impl Rating {
    pub fn for_footprint(footprint: f64) -> Self {
        if footprint < EXCELLENT_THRESHOLD {
            Rating::Excellent
        } else if footprint < AVERAGE_THRESHOLD {
            Rating::Average
        } else {
            Rating::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Average => "average",
            Rating::High => "high",
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            Rating::Excellent => "✅ Excellent! You're a climate hero. Keep it up!",
            Rating::Average => "⚠️ Average. Consider biking, saving energy, or reducing waste.",
            Rating::High => "❌ High impact. Time to take action: diet, travel, energy use.",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Rating::Excellent => "#28a745",
            Rating::Average => "#ffc107",
            Rating::High => "#dc3545",
        }
    }
}

pub fn build_report(footprint: f64, breakdown: &Breakdown) -> PredictionReport {
    let rating = Rating::for_footprint(footprint);
    let shares = breakdown.shares().unwrap_or([0.0; 4]);
    let slices = Category::ALL
        .iter()
        .zip(shares)
        .map(|(category, percent)| SliceReport {
            category: category.label().to_string(),
            kg: breakdown.get(*category),
            percent,
        })
        .collect();

    PredictionReport {
        footprint_kg: footprint,
        eco_score: eco_score(footprint),
        rating: rating.label().to_string(),
        tip: rating.tip().to_string(),
        breakdown: slices,
    }
}

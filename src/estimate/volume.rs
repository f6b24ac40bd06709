//! Work-item volume formulas.
//!
//! | item            | volume                     | unit |
//! |-----------------|----------------------------|------|
//! | Burda           | length × width             | m²   |
//! | Latasir Manual  | length × width             | m²   |
//! | Pelaburan Keras | length × width × 2.5       | ltr  |
//! | LPA             | length × width × thickness | m³   |

use crate::domain::{Unit, WorkItemType};

/// Spray rate for hard sealing, litres per square meter.
pub const HARD_SEAL_LITERS_PER_M2: f64 = 2.5;

/// Compute the quantity of work for one item.
pub fn compute_volume(item: WorkItemType, length: f64, width: f64, thickness: f64) -> (f64, Unit) {
    match item {
        WorkItemType::Burda | WorkItemType::LatasirManual => (length * width, Unit::SquareMeter),
        WorkItemType::PelaburanKeras => (length * width * HARD_SEAL_LITERS_PER_M2, Unit::Liter),
        WorkItemType::Lpa => (length * width * thickness, Unit::CubicMeter),
    }
}

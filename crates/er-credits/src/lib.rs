//! `er-credits` — green credits for choosing a cleaner route.
//!
//! Credits are always computed relative to the fastest route of the same
//! request, so all three variants must come from one traffic snapshot.
//!
//! | Scheme               | Formula                                                        |
//! |----------------------|----------------------------------------------------------------|
//! | `RelativeEmissions`  | `100 * saved/fastest * 1/max(extra_min, 1) * passengers`       |
//! | `DistanceCarbon`     | `km * 0.5 * dist_pct + saved_kg * 5 * carbon_pct` (per variant) |

pub mod scorer;


pub use scorer::GreenCreditScorer;

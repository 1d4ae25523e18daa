pub mod bounds;
pub mod constraints;
pub mod normalize;
pub mod priority;
pub mod recommendation;
pub mod value;

pub use bounds::{resolve_bounds, MetricBounds, ScoringContext};
pub use constraints::{Constraints, Rejection, Violation};
pub use priority::{priority_score, PriorityWeights};
pub use recommendation::{rank, score_candidates, RankingResult, Recommendation, ValueRating};
pub use value::value_score;

pub mod catalogue;
pub mod delayer;
pub mod jsonpath_cache;
pub mod matcher;
pub mod model;
pub mod regex_cache;
pub mod scenario;

pub use catalogue::Catalogue;
pub use delayer::{Delayer, ResponseDelayer};
pub use jsonpath_cache::JsonPathCache;
pub use matcher::{MatchOutcome, Matcher, ScenarioStateLookup};
pub use model::{
    BodyMatch, CommonMatch, Delay, FixedDelay, Mapping, Request, RequestMapping, ResponseMapping,
    ScenarioMapping,
};
pub use regex_cache::RegexCache;
pub use scenario::ScenarioHandler;

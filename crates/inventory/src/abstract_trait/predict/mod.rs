mod service;

pub use self::service::{DynPredictService, PredictServiceTrait};

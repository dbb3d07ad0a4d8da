//! Two-stage student GPA predictor.
//!
//! A lifestyle model turns daily-habit hours into a GPA estimate, which
//! is fed together with academic and demographic features into a
//! performance model that produces the final GPA. Both are ordinary
//! least-squares regressions over standardised features.
//!
//! Layers, outermost first:
//!
//! | module        | role                                              |
//! |---------------|---------------------------------------------------|
//! | `cli`         | argument parsing and dispatch                     |
//! | `application` | config, training / prediction use cases, JSON API |
//! | `domain`      | records, request validation, errors, traits       |
//! | `data`        | CSV loading, encoding, train/test split           |
//! | `ml`          | scaler, regressor, the two models                 |
//! | `infra`       | artifact store, training metrics log              |

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;

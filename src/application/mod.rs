// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer wires the other layers together to accomplish
// one goal at a time (train, predict, answer a request).
//
// Rules for this layer:
//   - No regression math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No file formats here (that's Layer 4 and 6)
//   - Only workflow coordination
//
//   config.rs           — PipelineConfig: dataset paths, store
//                         location, split settings, mismatch policy
//   train_use_case.rs   — ensure_trained / retrain
//   predict_use_case.rs — two-stage inference over the store
//   api.rs              — JSON request → 200/400 response

pub mod config;

// The training workflow
pub mod train_use_case;

// The inference workflow
pub mod predict_use_case;

pub mod api;

#[cfg(test)]
mod fixtures;

/// Chart layer: declarative chart specifications and the selection-to-view
/// functions that produce them.
///
/// Each function is pure: it reads the immutable [`crate::data::model::DatasetStore`]
/// and one control value, and returns a [`spec::ChartSpec`] the UI renders.
pub mod spec;
pub mod views;

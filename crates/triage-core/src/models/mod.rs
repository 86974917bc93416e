pub mod answer;
pub mod diagnosis;
pub mod mode;
pub mod session;
pub mod symptom;

// src/input/mod.rs

pub mod input_deck;
pub mod parser;

pub use input_deck::{
    AdvectionSettings, GridSettings, InputDeck, ManufacturedSolution, PoissonSettings,
    StencilSettings, TimeMethod,
};
pub use parser::parse_input_deck;

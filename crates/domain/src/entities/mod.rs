//! Domain entities

mod character;

pub use character::{
    Appearance, Backstory, Build, CharacterProfile, CounterpartView, Gender, LifeEvent,
    Personality, Skills, StatBlock, Temperament,
};

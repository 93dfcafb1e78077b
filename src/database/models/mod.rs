pub mod drink;

pub use drink::{Drink, DrinkBrief, DrinkRow, Ingredient};

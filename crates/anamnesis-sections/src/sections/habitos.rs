use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Hábitos: tobacco, alcohol, exercise, drug use, diet and sleep.
pub struct Habitos;

impl Section for Habitos {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "habitos",
                "Hábitos",
                &[],
                &[
                    "tabaco",
                    "alcohol",
                    "ejercicio",
                    "drogas",
                    "dieta",
                    "sueno",
                ],
                10,
            )
        });
        &DEFINITION
    }
}

use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Datos personales: identity and contact details of the patient.
/// Name and date of birth are required before an anamnesis is complete.
pub struct DatosPersonales;

impl Section for DatosPersonales {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "datos-personales",
                "Datos personales",
                &["nombre_completo", "fecha_nacimiento"],
                &["sexo", "telefono", "email", "direccion"],
                15,
            )
        });
        &DEFINITION
    }
}

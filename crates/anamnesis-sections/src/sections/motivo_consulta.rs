use std::sync::LazyLock;

use crate::Section;
use crate::catalog::SectionDefinition;

/// Motivo de consulta: the chief complaint, in the patient's words.
pub struct MotivoConsulta;

impl Section for MotivoConsulta {
    fn definition(&self) -> &SectionDefinition {
        static DEFINITION: LazyLock<SectionDefinition> = LazyLock::new(|| {
            SectionDefinition::new(
                "motivo-consulta",
                "Motivo de consulta",
                &["motivo_principal"],
                &["tiempo_evolucion", "descripcion"],
                20,
            )
        });
        &DEFINITION
    }
}

//! anamnesis-sections
//!
//! Clinical section definitions for the anamnesis form. Pure data: which
//! fields each section requires or accepts, how much each section weighs in
//! the overall completion, the ordered field-classification rules and the
//! stop words dropped from search terms.

pub mod catalog;
pub mod error;
pub mod rules;
pub mod sections;
pub mod stopwords;

use catalog::SectionDefinition;

/// Trait implemented by each clinical section of the anamnesis.
pub trait Section: Send + Sync {
    /// The static definition of this section.
    fn definition(&self) -> &SectionDefinition;

    /// Unique identifier (e.g., "datos-personales", "habitos").
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Human-readable name (e.g., "Datos personales").
    fn name(&self) -> &str {
        &self.definition().name
    }
}

/// Return all registered sections, in catalog order.
pub fn all_sections() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(sections::datos_personales::DatosPersonales),
        Box::new(sections::motivo_consulta::MotivoConsulta),
        Box::new(sections::historia_enfermedad::HistoriaEnfermedad),
        Box::new(sections::antecedentes_personales::AntecedentesPersonales),
        Box::new(sections::antecedentes_familiares::AntecedentesFamiliares),
        Box::new(sections::habitos::Habitos),
        Box::new(sections::revision_sistemas::RevisionSistemas),
    ]
}

/// Look up a section by ID.
pub fn get_section(id: &str) -> Option<Box<dyn Section>> {
    all_sections().into_iter().find(|s| s.id() == id)
}

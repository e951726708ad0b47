//! Field-name classification rules.
//!
//! Form fields that arrive without a section (neither nested under a section
//! key nor prefixed with `<section>_`) are assigned by matching their
//! normalized name (lower-case, without diacritics) against these patterns.
//! The table is ordered: the first section with a matching pattern wins, so a
//! field matching several sections goes to the one listed first.

use serde::{Deserialize, Serialize};

/// Patterns for one section. Each pattern is a regular expression matched
/// anywhere in the normalized field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub section_id: String,
    pub patterns: Vec<String>,
}

/// Built-in classification table, in tie-break order.
pub const CLASSIFICATION_RULES: &[(&str, &[&str])] = &[
    (
        "datos-personales",
        &[
            "nombre",
            "apellido",
            "nacimiento",
            "(^|_)edad($|_)",
            "sexo",
            "genero",
            "email|correo",
            "telefono|celular|movil",
            "direccion|domicilio",
            "documento|dni|cedula",
            "ocupacion|profesion",
            "estado_civil",
        ],
    ),
    ("motivo-consulta", &["motivo", "consulta", "queja"]),
    (
        "historia-enfermedad",
        &[
            "enfermedad_actual|historia_enfermedad",
            "sintoma",
            "inicio",
            "evolucion",
            "duracion",
            "dolor",
        ],
    ),
    (
        "antecedentes-personales",
        &[
            "antecedente",
            "cirugia|quirurgic|operacion",
            "alergi",
            "medicamento|medicacion",
            "hospitaliza",
            "vacuna",
            "cronic|patologic",
        ],
    ),
    (
        "antecedentes-familiares",
        &["familia", "padre", "madre", "herman", "abuel", "hereditari"],
    ),
    (
        "habitos",
        &[
            "tabaco|fuma|cigarr",
            "alcohol",
            "ejercicio|actividad_fisica",
            "droga",
            "dieta|alimentacion",
            "sueno",
        ],
    ),
    (
        "revision-sistemas",
        &[
            "revision",
            "sistema",
            "cardiovascular",
            "respiratori",
            "digestiv",
            "neurologic",
            "urinari",
        ],
    ),
];

/// The built-in table as owned rules.
pub fn builtin_rules() -> Vec<ClassificationRule> {
    CLASSIFICATION_RULES
        .iter()
        .map(|(section_id, patterns)| ClassificationRule {
            section_id: section_id.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        })
        .collect()
}

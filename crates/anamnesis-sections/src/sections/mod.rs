pub mod antecedentes_familiares;
pub mod antecedentes_personales;
pub mod datos_personales;
pub mod habitos;
pub mod historia_enfermedad;
pub mod motivo_consulta;
pub mod revision_sistemas;

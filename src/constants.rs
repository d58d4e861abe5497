//! Constants used throughout the expedidor application

/// Default filename prefix for generated credentials
pub const DEFAULT_PREFIX: &str = "TITULO";

/// Category tag used in filenames when no template variant was selected
pub const DEFAULT_CATEGORY: &str = "SIN_TIPO";

/// Identifier used in filenames when the id field normalizes to empty
pub const FALLBACK_ID: &str = "sin_dni";

/// Display format for date-typed fields
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Font size in points forced onto the name tokens on replacement
pub const NAME_FONT_SIZE_PT: f32 = 37.0;

/// File extension of the intermediate (unconverted) document
pub const DOCUMENT_EXT: &str = "json";

/// Token literals of the fixed domain table
pub mod token {
    pub const NOMBRE: &str = "{{NOMBRE}}";
    pub const APELLIDOS: &str = "{{APELLIDOS}}";
    pub const DNI: &str = "{{DNI}}";
    pub const TITULO: &str = "{{TITULO}}";
    pub const PROMOCION: &str = "{{PROMOCION}}";
    pub const FECHA: &str = "{{FECHA}}";
    pub const FECHA_EXPEDICION: &str = "{{FECHA EXPEDICIÓN}}";
    pub const NUMERO_TITULO: &str = "{{NºTITULO}}";
}

/// Column names of the tabular dataset the tokens read from
pub mod column {
    pub const NOMBRE: &str = "NOMBRE";
    pub const APELLIDOS: &str = "APELLIDOS";
    pub const DNI: &str = "DNI ALUMNO";
    pub const TITULO: &str = "NOMBRE CURSO EXACTO EN TITULO";
    pub const PROMOCION: &str = "PROMOCION EN LA QUE FINALIZA";
    pub const FECHA: &str = "FECHA";
    pub const FECHA_EXPEDICION: &str = "FECHA EXPEDICIÓN";
    pub const NUMERO_TITULO: &str = "Nº TITULO";
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}

//! Line preprocessing: split, trim, drop empties and boilerplate.
//!
//! Noise patterns are matched against the [folded](crate::normalize::fold)
//! line, so they are written in lowercase without accents and match
//! regardless of the case and diacritics the document was printed with.
//! This stage never extracts fields and never fails.

use regex::RegexSet;

use crate::normalize::fold;

/// Boilerplate shared by both document kinds.
const COMMON_NOISE: &[&str] = &[
    // Page footers: "Página 2 de 5", "Pág. 2", "2 de 5", "- 2 -"
    r"^pag(ina|\.)?\s*\d+(\s*(de|/)\s*\d+)?$",
    r"^\d+\s*de\s*\d+$",
    r"^-\s*\d+\s*-$",
    // Institution banners
    r"^universidad\b",
    r"^facultad\b",
    r"^(ministerio|secretaria|direccion|departamento)\s+(de|academica|general)\b",
    // Student / document-number headers
    r"^(alumn[oa]|estudiante|apellido|nombre y apellido)\b",
    r"^(legajo|dni|documento)\b",
    r"^tipo y (nro|numero|n[°º])",
    r"^(carrera|plan de estudios?)\b",
    // Emission footers
    r"^fecha de (emision|impresion)\b",
    r"^(emitido|impreso) (el|por)\b",
];

/// Boilerplate specific to academic transcripts.
const TRANSCRIPT_NOISE: &[&str] = &[
    r"^(historia academica|certificado analitico|analitico)\b",
    // Column header rows: "Nro Origen Código Materia Acta Fecha Nota"
    r"\borigen\b.*\b(materia|asignatura|codigo)\b",
    r"^(n[°º]|nro\.?|#)\s*(origen|materia)?$",
    // Resolution / date-column labels printed on their own line
    r"^resolucion\b",
    r"^(acta|fecha|nota|libro|folio)(\s+(acta|fecha|nota|libro|folio|resolucion))*\s*:?$",
    // Summary block
    r"^(promedio|total de materias|materias aprobadas|cantidad de)\b",
];

/// Boilerplate specific to offering schedules, which are usually printed
/// from the student web portal.
const OFFERING_NOISE: &[&str] = &[
    r"^(oferta (academica|de materias|de comisiones)|horarios? de cursada)\b",
    // Navigation / menu entries
    r"^(inicio|menu|volver|imprimir|salir|ayuda|cerrar sesion|mis datos|tramites|inscripciones?)$",
    r"^(https?://|www\.)",
    // Browser print header: "16/10/2026, 10:23"
    r"^\d{1,2}/\d{1,2}/\d{2,4},?\s+\d{1,2}:\d{2}",
    r"^\d+/\d+$",
    // Column header rows
    r"^(codigo|cod\.?)\b.*\b(comision|horario|modalidad)\b",
    r"^(materia|asignatura|comision|horario|modalidad|sede|dias?|docente)(\s+(materia|asignatura|comision|horario|modalidad|sede|dias?|docente))*$",
];

/// A trimmed, non-empty line of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1-based physical line number in the source text.
    pub number: usize,
    pub text: &'a str,
}

/// Splits raw text into lines and filters boilerplate.
#[derive(Debug, Clone)]
pub struct LinePreprocessor {
    noise: RegexSet,
}

impl LinePreprocessor {
    /// Builds a preprocessor from folded-text noise patterns.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if any pattern fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            noise: RegexSet::new(patterns)?,
        })
    }

    /// Preprocessor for transcripts: the built-in noise set plus `extra`.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if an `extra` pattern fails to compile.
    pub fn transcript(extra: &[String]) -> Result<Self, regex::Error> {
        Self::new(builtin(TRANSCRIPT_NOISE, extra))
    }

    /// Preprocessor for offering schedules: the built-in noise set plus
    /// `extra`.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if an `extra` pattern fails to compile.
    pub fn offering(extra: &[String]) -> Result<Self, regex::Error> {
        Self::new(builtin(OFFERING_NOISE, extra))
    }

    /// Whether `line` is boilerplate.
    #[must_use]
    pub fn is_noise(&self, line: &str) -> bool {
        self.noise.is_match(&fold(line))
    }

    /// Returns the trimmed, non-empty, non-boilerplate lines of `text` in
    /// document order.
    #[must_use]
    pub fn lines<'a>(&self, text: &'a str) -> Vec<RawLine<'a>> {
        let mut dropped = 0_usize;
        let lines: Vec<RawLine<'a>> = text
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.trim();
                if line.is_empty() {
                    return None;
                }
                if self.is_noise(line) {
                    log::trace!("Dropping boilerplate line {}: {line}", idx + 1);
                    dropped += 1;
                    return None;
                }
                Some(RawLine {
                    number: idx + 1,
                    text: line,
                })
            })
            .collect();

        log::debug!(
            "Preprocessed {} line(s), dropped {dropped} boilerplate line(s)",
            lines.len()
        );

        lines
    }
}

fn builtin<'a>(specific: &'a [&'a str], extra: &'a [String]) -> impl Iterator<Item = &'a str> {
    COMMON_NOISE
        .iter()
        .chain(specific)
        .copied()
        .chain(extra.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(lines: &[RawLine<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn trims_and_drops_empty_lines() {
        let pre = LinePreprocessor::new(Vec::<String>::new()).unwrap();
        let lines = pre.lines("  uno  \r\n\n   \n\tdos\n");
        assert_eq!(texts(&lines), vec!["uno", "dos"]);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn drops_transcript_boilerplate() {
        let pre = LinePreprocessor::transcript(&[]).unwrap();
        let text = "UNIVERSIDAD TECNOLÓGICA NACIONAL\n\
                    Facultad Regional Buenos Aires\n\
                    Alumno: PEREZ, JUAN\n\
                    Legajo: 123456-7\n\
                    DNI 30111222\n\
                    Nro Origen Código Materia Acta Fecha Nota\n\
                    Resolución\n\
                    Fecha\n\
                    26Equivalencia03624\n\
                    INTRODUCCION A LOS SISTEMAS DE\n\
                    Página 1 de 3\n\
                    INFORMACION\n\
                    0431/202221/12/20229\n\
                    2 de 3\n";
        let lines = pre.lines(text);
        assert_eq!(
            texts(&lines),
            vec![
                "26Equivalencia03624",
                "INTRODUCCION A LOS SISTEMAS DE",
                "INFORMACION",
                "0431/202221/12/20229",
            ]
        );
    }

    #[test]
    fn drops_offering_boilerplate() {
        let pre = LinePreprocessor::offering(&[]).unwrap();
        let text = "16/10/2026, 10:23 Oferta de materias\n\
                    Inicio\n\
                    Menú\n\
                    OFERTA ACADÉMICA 2026\n\
                    Código Materia Comisión Horario Modalidad\n\
                    0902INGLES NIVEL II1300Lu08a12 Semipresencial\n\
                    https://alumnos.example.edu/oferta\n\
                    1/2\n";
        let lines = pre.lines(text);
        assert_eq!(
            texts(&lines),
            vec!["0902INGLES NIVEL II1300Lu08a12 Semipresencial"]
        );
    }

    #[test]
    fn keeps_subject_names_that_resemble_labels() {
        let pre = LinePreprocessor::transcript(&[]).unwrap();
        for line in [
            "INFORMACION",
            "SISTEMAS Y ORGANIZACIONES",
            "FISICA I",
            "DOCUMENTACION DE SISTEMAS",
            "DNIT APLICADA",
            "LEGAJOS Y ARCHIVOS",
            "0431/202221/12/20229",
            "2Promocion01026TECNOLOGIA INGENIERIA Y SOCIEDAD3899202029/08/20208",
        ] {
            assert!(!pre.is_noise(line), "{line} was treated as noise");
        }
    }

    #[test]
    fn document_number_headers_are_noise() {
        let pre = LinePreprocessor::transcript(&[]).unwrap();
        for line in ["Documento: 30111222", "Tipo y Nro. de documento", "Tipo y N° DNI"] {
            assert!(pre.is_noise(line), "{line} was kept");
        }
    }

    #[test]
    fn extra_patterns_extend_builtin_set() {
        let pre = LinePreprocessor::transcript(&["^confidencial$".to_string()]).unwrap();
        assert!(pre.is_noise("CONFIDENCIAL"));
        assert!(pre.is_noise("Página 3"));
    }

    #[test]
    fn invalid_extra_pattern_is_rejected() {
        assert!(LinePreprocessor::offering(&["(unclosed".to_string()]).is_err());
    }

    #[test]
    fn all_boilerplate_yields_no_lines() {
        let pre = LinePreprocessor::transcript(&[]).unwrap();
        assert!(pre.lines("Página 1 de 1\nUNIVERSIDAD NACIONAL\n\n").is_empty());
    }
}

//! Strand orientation shared by annotation and repeat records

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use alu_regions::core::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Parse a strand column. `"."` is unstranded and maps to `Ok(None)`;
    /// anything other than `+`, `-` or `.` is rejected.
    pub fn parse_field(s: &str) -> Result<Option<Self>, String> {
        match s {
            "+" => Ok(Some(Strand::Plus)),
            "-" => Ok(Some(Strand::Minus)),
            "." => Ok(None),
            other => Err(other.to_string()),
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }
}

/// Render an optional strand the way annotation columns spell it
pub fn strand_char(strand: Option<Strand>) -> char {
    strand.map(|s| s.to_char()).unwrap_or('.')
}

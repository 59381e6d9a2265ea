use log::*;
mod tables;

/// The fixed set of named palettes a plot can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Magma,
    Inferno,
    Plasma,
    Viridis,
    Cividis,
    Turbo,
    Category10,
    Dark2,
}

impl Palette {
    /// Resolves a palette by name. Total: any unrecognized or empty name
    /// falls back to Turbo.
    pub fn resolve(name: &str) -> Palette {
        match name {
            "Magma" => Palette::Magma,
            "Inferno" => Palette::Inferno,
            "Plasma" => Palette::Plasma,
            "Viridis" => Palette::Viridis,
            "Cividis" => Palette::Cividis,
            "Turbo" => Palette::Turbo,
            "Category10" => Palette::Category10,
            "Dark2" => Palette::Dark2,
            other => {
                if !other.is_empty() {
                    warn!("Unknown palette '{}', falling back to Turbo", other);
                }
                Palette::Turbo
            }
        }
    }

    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Palette::Magma => &tables::MAGMA_11,
            Palette::Inferno => &tables::INFERNO_11,
            Palette::Plasma => &tables::PLASMA_11,
            Palette::Viridis => &tables::VIRIDIS_11,
            Palette::Cividis => &tables::CIVIDIS_11,
            Palette::Turbo => &tables::TURBO_11,
            Palette::Category10 => &tables::CATEGORY10_10,
            Palette::Dark2 => &tables::DARK2_8,
        }
    }
}

/// Color shown for bucket values that are not in the factor list.
const UNMAPPED_COLOR: [u8; 3] = [128, 128, 128];

/// Assigns each factor a discrete color from a palette, wrapping around when
/// there are more factors than colors.
pub struct CategoricalColorMapper {
    factors: Vec<String>,
    colors: Vec<[u8; 3]>,
}

impl CategoricalColorMapper {
    pub fn new(factors: &[String], palette: Palette) -> CategoricalColorMapper {
        let colors = palette
            .colors()
            .iter()
            .map(|hex| parse_hex_color(hex).unwrap_or(UNMAPPED_COLOR))
            .collect();
        CategoricalColorMapper {
            factors: factors.to_vec(),
            colors,
        }
    }

    pub fn color_for(&self, factor: &str) -> [u8; 3] {
        match self.factors.iter().position(|f| f == factor) {
            Some(i) => self.colors[i % self.colors.len()],
            None => UNMAPPED_COLOR,
        }
    }
}

fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn hex_of(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn resolve_known_names() {
        assert_eq!(Palette::resolve("Magma"), Palette::Magma);
        assert_eq!(Palette::resolve("Inferno"), Palette::Inferno);
        assert_eq!(Palette::resolve("Plasma"), Palette::Plasma);
        assert_eq!(Palette::resolve("Viridis"), Palette::Viridis);
        assert_eq!(Palette::resolve("Cividis"), Palette::Cividis);
        assert_eq!(Palette::resolve("Turbo"), Palette::Turbo);
        assert_eq!(Palette::resolve("Category10"), Palette::Category10);
        assert_eq!(Palette::resolve("Dark2"), Palette::Dark2);
    }

    #[test]
    fn resolve_falls_back_to_turbo() {
        assert_eq!(Palette::resolve(""), Palette::Turbo);
        assert_eq!(Palette::resolve("viridis"), Palette::Turbo);
        assert_eq!(Palette::resolve("NotAPalette"), Palette::Turbo);
    }

    #[test]
    fn color_counts() {
        assert_eq!(Palette::Viridis.colors().len(), 11);
        assert_eq!(Palette::Turbo.colors().len(), 11);
        assert_eq!(Palette::Category10.colors().len(), 10);
        assert_eq!(Palette::Dark2.colors().len(), 8);
    }

    #[test]
    fn mapper_assigns_in_order() {
        let factors = vec!["a".to_string(), "b".to_string()];
        let mapper = CategoricalColorMapper::new(&factors, Palette::Category10);
        assert_eq!(mapper.color_for("a"), [0x1f, 0x77, 0xb4]);
        assert_eq!(mapper.color_for("b"), [0xff, 0x7f, 0x0e]);
    }

    #[test]
    fn mapper_wraps_past_palette_end() {
        let factors: Vec<String> = (0..9).map(|i| format!("f{}", i)).collect();
        let mapper = CategoricalColorMapper::new(&factors, Palette::Dark2);
        assert_eq!(mapper.color_for("f8"), mapper.color_for("f0"));
    }

    #[test]
    fn mapper_unknown_factor_is_gray() {
        let factors = vec!["a".to_string()];
        let mapper = CategoricalColorMapper::new(&factors, Palette::Viridis);
        assert_eq!(mapper.color_for("zzz"), [128, 128, 128]);
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(parse_hex_color("#1f77b4"), Some([0x1f, 0x77, 0xb4]));
        assert_eq!(hex_of([0x1f, 0x77, 0xb4]), "#1f77b4");
        assert_eq!(parse_hex_color("1f77b4"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }

    proptest! {
        #[test]
        fn resolve_is_total(name in ".*") {
            let palette = Palette::resolve(&name);
            prop_assert!(!palette.colors().is_empty());
        }

        #[test]
        fn color_for_never_panics(factor in ".*") {
            let factors = vec!["a".to_string(), "b".to_string()];
            let mapper = CategoricalColorMapper::new(&factors, Palette::Turbo);
            mapper.color_for(&factor);
        }
    }
}

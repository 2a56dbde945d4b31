// quickmagick/src/command/geometry.rs
use std::fmt;

/// Modifier appended to a geometry string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFlag {
    /// `%`: width and height are percentages.
    Percent,
    /// `!`: ignore the aspect ratio.
    Aspect,
    /// `<`: only enlarge smaller images.
    Less,
    /// `>`: only shrink larger images.
    Greater,
    /// `@`: width is a pixel area.
    Area,
    /// `^`: fill the given size (minimum dimensions).
    Minimum,
}

impl GeometryFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryFlag::Percent => "%",
            GeometryFlag::Aspect => "!",
            GeometryFlag::Less => "<",
            GeometryFlag::Greater => ">",
            GeometryFlag::Area => "@",
            GeometryFlag::Minimum => "^",
        }
    }
}

impl fmt::Display for GeometryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<w>x<h>+<x>+<y><flag>` geometry. Every part is optional and values are
/// kept as text, so anything printable is accepted unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Geometry {
    width: Option<String>,
    height: Option<String>,
    x: Option<String>,
    y: Option<String>,
    flag: Option<GeometryFlag>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(width: impl fmt::Display, height: impl fmt::Display) -> Self {
        Self::new().width(width).height(height)
    }

    pub fn width(mut self, width: impl fmt::Display) -> Self {
        self.width = Some(width.to_string());
        self
    }

    pub fn height(mut self, height: impl fmt::Display) -> Self {
        self.height = Some(height.to_string());
        self
    }

    pub fn x(mut self, x: impl fmt::Display) -> Self {
        self.x = Some(x.to_string());
        self
    }

    pub fn y(mut self, y: impl fmt::Display) -> Self {
        self.y = Some(y.to_string());
        self
    }

    pub fn offset(self, x: impl fmt::Display, y: impl fmt::Display) -> Self {
        self.x(x).y(y)
    }

    pub fn flag(mut self, flag: GeometryFlag) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.flag.is_none()
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        if let Some(width) = &self.width {
            out.push_str(width);
        }
        if let Some(height) = &self.height {
            out.push('x');
            out.push_str(height);
        }
        if let Some(x) = &self.x {
            out.push('+');
            out.push_str(x);
        }
        if let Some(y) = &self.y {
            out.push('+');
            out.push_str(y);
        }
        if let Some(flag) = self.flag {
            out.push_str(flag.as_str());
        }
        out
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_geometry() {
        let g = Geometry::size(300, 200).offset(10, 20).flag(GeometryFlag::Aspect);
        assert_eq!(g.encode(), "300x200+10+20!");
    }

    #[test]
    fn partial_geometries() {
        assert_eq!(Geometry::new().width(50).flag(GeometryFlag::Percent).encode(), "50%");
        assert_eq!(Geometry::new().height(80).encode(), "x80");
        assert_eq!(Geometry::new().offset(5, 7).encode(), "+5+7");
        assert_eq!(Geometry::size(8190, 8190).flag(GeometryFlag::Greater).encode(), "8190x8190>");
    }

    #[test]
    fn empty_geometry_is_empty_string() {
        let g = Geometry::new();
        assert!(g.is_empty());
        assert_eq!(g.to_string(), "");
    }

    #[test]
    fn flags_map_to_wire_constants() {
        let all = [
            (GeometryFlag::Percent, "%"),
            (GeometryFlag::Aspect, "!"),
            (GeometryFlag::Less, "<"),
            (GeometryFlag::Greater, ">"),
            (GeometryFlag::Area, "@"),
            (GeometryFlag::Minimum, "^"),
        ];
        for (flag, text) in all {
            assert_eq!(flag.as_str(), text);
        }
    }

    #[test]
    fn fields_can_be_recovered_by_splitting() {
        let flags = [
            None,
            Some(GeometryFlag::Percent),
            Some(GeometryFlag::Aspect),
            Some(GeometryFlag::Less),
            Some(GeometryFlag::Greater),
            Some(GeometryFlag::Area),
            Some(GeometryFlag::Minimum),
        ];

        // every subset of width/height/x/y, with and without each flag
        for mask in 0u8..16 {
            for flag in flags {
                let mut g = Geometry::new();
                if mask & 1 != 0 {
                    g = g.width(640);
                }
                if mask & 2 != 0 {
                    g = g.height(480);
                }
                if mask & 4 != 0 {
                    g = g.x(12);
                }
                if mask & 8 != 0 {
                    g = g.y(34);
                }
                if let Some(flag) = flag {
                    g = g.flag(flag);
                }
                let encoded = g.encode();

                let body = match flag {
                    Some(flag) => encoded.strip_suffix(flag.as_str()),
                    None => Some(encoded.as_str()),
                };
                let body = body.unwrap_or_else(|| panic!("flag missing in {}", encoded));

                let mut plus = body.split('+');
                let size = plus.next().unwrap_or("");
                let mut dims = size.split('x');
                let width = dims.next().filter(|s| !s.is_empty());
                let height = dims.next();
                let offsets: Vec<&str> = plus.collect();

                assert_eq!(width, (mask & 1 != 0).then_some("640"), "{}", encoded);
                assert_eq!(height, (mask & 2 != 0).then_some("480"), "{}", encoded);

                let mut expected = Vec::new();
                if mask & 4 != 0 {
                    expected.push("12");
                }
                if mask & 8 != 0 {
                    expected.push("34");
                }
                assert_eq!(offsets, expected, "{}", encoded);
            }
        }
    }
}

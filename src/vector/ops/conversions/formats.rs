use std::fmt::Write;

use crate::errors::{GdalError, Result};
use crate::vector::geometry::{accepts_child, Coord, Geometry};
use crate::vector::geometry_type::{BaseType, Dimensions, GeometryType};

/// # Well-known text
///
/// Reading and writing of [WKT](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry).
impl Geometry {
    /// Parses ISO WKT. A coordinate dimension given without a `Z`/`M` tag is
    /// taken as Z (three ordinates) or ZM (four).
    pub fn from_wkt(wkt: &str) -> Result<Geometry> {
        parse(wkt)
    }

    /// ISO WKT representation.
    pub fn wkt(&self) -> String {
        let mut out = String::new();
        self.write_wkt(&mut out, true);
        out
    }

    fn write_wkt(&self, out: &mut String, tagged: bool) {
        let ty = self.geometry_type();
        if tagged {
            out.push_str(&ty.to_string());
        }
        if self.is_empty() {
            if tagged {
                out.push(' ');
            }
            out.push_str("EMPTY");
            return;
        }
        if tagged {
            out.push(' ');
        }
        match ty.base() {
            BaseType::Point | BaseType::LineString | BaseType::CircularString => {
                self.write_coords(out)
            }
            BaseType::Polygon
            | BaseType::Triangle
            | BaseType::MultiPoint
            | BaseType::MultiLineString
            | BaseType::MultiPolygon
            | BaseType::PolyhedralSurface
            | BaseType::Tin => self.write_parts(out, |_| false),
            BaseType::CompoundCurve
            | BaseType::CurvePolygon
            | BaseType::MultiCurve
            | BaseType::MultiSurface => self.write_parts(out, |part| {
                !matches!(
                    part.geometry_type().base(),
                    BaseType::LineString | BaseType::Polygon
                )
            }),
            BaseType::GeometryCollection | BaseType::Unknown | BaseType::Curve | BaseType::Surface => {
                self.write_parts(out, |_| true)
            }
        }
    }

    fn write_parts(&self, out: &mut String, tag_part: impl Fn(&Geometry) -> bool) {
        out.push('(');
        for (i, part) in self.parts().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            part.write_wkt(out, tag_part(part));
        }
        out.push(')');
    }

    fn write_coords(&self, out: &mut String) {
        let ty = self.geometry_type();
        out.push('(');
        for (i, c) in self.points().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{} {}", c.x, c.y);
            if ty.has_z() {
                let _ = write!(out, " {}", c.z);
            }
            if ty.has_m() {
                let _ = write!(out, " {}", c.m);
            }
        }
        out.push(')');
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Word(String),
    Number(f64),
    LParen,
    RParen,
    Comma,
}

fn parse(wkt: &str) -> Result<Geometry> {
    let mut parser = Parser {
        tokens: tokenize(wkt)?,
        pos: 0,
        max_ordinates: 2,
    };
    let (mut geom, tag) = parser.tagged_geometry(None)?;
    if parser.pos != parser.tokens.len() {
        return Err(parser.error("trailing characters"));
    }
    let dims = match tag {
        Some(dims) => dims,
        None => match parser.max_ordinates {
            2 => Dimensions::empty(),
            3 => Dimensions::Z,
            _ => Dimensions::Z | Dimensions::M,
        },
    };
    geom.set_dimensions(dims);
    Ok(geom)
}

fn tokenize(wkt: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = wkt.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        match c {
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !c.is_ascii_alphanumeric() {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Word(wkt[start..end].to_ascii_uppercase()));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                let text = &wkt[start..end];
                let value = text.parse::<f64>().map_err(|_| GdalError::WktParse {
                    position: tokens.len(),
                    msg: format!("invalid number '{text}'"),
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(GdalError::WktParse {
                    position: tokens.len(),
                    msg: format!("unexpected character '{other}'"),
                })
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    max_ordinates: usize,
}

impl Parser {
    fn error(&self, msg: &str) -> GdalError {
        GdalError::WktParse {
            position: self.pos,
            msg: msg.to_string(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if self.peek() == Some(&token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected {token:?}")))
        }
    }

    fn next_is(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    /// `TYPE [Z|M|ZM] (EMPTY | body)`. Returns the geometry and its explicit
    /// dimension tag, if any.
    fn tagged_geometry(
        &mut self,
        inherited: Option<Dimensions>,
    ) -> Result<(Geometry, Option<Dimensions>)> {
        let word = match self.peek() {
            Some(Token::Word(word)) => word.clone(),
            _ => return Err(self.error("expected geometry keyword")),
        };
        self.pos += 1;
        let (ty, mut tag) = match GeometryType::from_ogc_name(&word) {
            Some(ty) if ty.dims().is_empty() => (ty, None),
            Some(ty) => (ty, Some(ty.dims())),
            None => return Err(self.error(&format!("unknown geometry keyword '{word}'"))),
        };
        if let Some(Token::Word(word)) = self.peek() {
            let dims = match word.as_str() {
                "Z" => Some(Dimensions::Z),
                "M" => Some(Dimensions::M),
                "ZM" => Some(Dimensions::Z | Dimensions::M),
                _ => None,
            };
            if dims.is_some() {
                tag = dims;
                self.pos += 1;
            }
        }
        if let Some(Token::Word(word)) = self.peek() {
            if word == "EMPTY" {
                self.pos += 1;
                return Ok((Geometry::empty(ty.flatten()), tag));
            }
        }
        let geom = self.body(ty.base(), tag.or(inherited))?;
        Ok((geom, tag))
    }

    fn body(&mut self, base: BaseType, dims: Option<Dimensions>) -> Result<Geometry> {
        let ty = GeometryType::flat(base);
        match base {
            BaseType::Point => {
                self.expect(Token::LParen)?;
                let coord = self.coord(dims)?;
                self.expect(Token::RParen)?;
                Ok(Geometry::point(coord, Dimensions::empty()))
            }
            BaseType::LineString | BaseType::CircularString => {
                Geometry::with_points(ty, self.coord_list(dims)?)
            }
            BaseType::Polygon | BaseType::Triangle => self.rings(ty, dims),
            BaseType::MultiPoint => self.list(ty, |p| {
                if p.next_is(&Token::LParen) {
                    p.body(BaseType::Point, dims)
                } else {
                    Ok(Geometry::point(p.coord(dims)?, Dimensions::empty()))
                }
            }),
            BaseType::MultiLineString => {
                self.list(ty, |p| p.body(BaseType::LineString, dims))
            }
            BaseType::MultiPolygon | BaseType::PolyhedralSurface => {
                self.list(ty, |p| p.rings(GeometryType::POLYGON, dims))
            }
            BaseType::Tin => self.list(ty, |p| p.rings(GeometryType::TRIANGLE, dims)),
            BaseType::CompoundCurve | BaseType::CurvePolygon | BaseType::MultiCurve => {
                self.list(ty, |p| {
                    if p.next_is(&Token::LParen) {
                        p.body(BaseType::LineString, dims)
                    } else {
                        p.tagged_geometry(dims).map(|(geom, _)| geom)
                    }
                })
            }
            BaseType::MultiSurface => self.list(ty, |p| {
                if p.next_is(&Token::LParen) {
                    p.rings(GeometryType::POLYGON, dims)
                } else {
                    p.tagged_geometry(dims).map(|(geom, _)| geom)
                }
            }),
            BaseType::GeometryCollection => {
                self.list(ty, |p| p.tagged_geometry(dims).map(|(geom, _)| geom))
            }
            BaseType::Unknown | BaseType::Curve | BaseType::Surface => Err(self.error(&format!(
                "{} is not instantiable",
                base.ogc_name()
            ))),
        }
    }

    fn rings(&mut self, ty: GeometryType, dims: Option<Dimensions>) -> Result<Geometry> {
        self.list(ty, |p| p.body(BaseType::LineString, dims))
    }

    /// `( item {, item} )` collected as the parts of a `ty` geometry.
    fn list(
        &mut self,
        ty: GeometryType,
        mut item: impl FnMut(&mut Parser) -> Result<Geometry>,
    ) -> Result<Geometry> {
        self.expect(Token::LParen)?;
        let mut parts = Vec::new();
        loop {
            let position = self.pos;
            let part = item(self)?;
            // Dimensions are only known once the whole text is read, so parts
            // are pushed without the normalization `add_geometry` performs.
            if !accepts_child(ty, part.geometry_type()) {
                return Err(GdalError::WktParse {
                    position,
                    msg: format!("{} cannot contain {}", ty, part.geometry_type().flatten()),
                });
            }
            parts.push(part);
            if self.next_is(&Token::Comma) {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.expect(Token::RParen)?;
        Ok(Geometry::from_parts_unchecked(ty, parts))
    }

    fn coord_list(&mut self, dims: Option<Dimensions>) -> Result<Vec<Coord>> {
        self.expect(Token::LParen)?;
        let mut coords = vec![self.coord(dims)?];
        while self.next_is(&Token::Comma) {
            self.pos += 1;
            coords.push(self.coord(dims)?);
        }
        self.expect(Token::RParen)?;
        Ok(coords)
    }

    fn coord(&mut self, dims: Option<Dimensions>) -> Result<Coord> {
        let mut ordinates = Vec::with_capacity(4);
        while let Some(Token::Number(value)) = self.peek() {
            ordinates.push(*value);
            self.pos += 1;
        }
        if !(2..=4).contains(&ordinates.len()) {
            return Err(self.error("expected 2 to 4 ordinates"));
        }
        self.max_ordinates = self.max_ordinates.max(ordinates.len());
        let (x, y) = (ordinates[0], ordinates[1]);
        let third = ordinates.get(2).copied().unwrap_or(0.0);
        let fourth = ordinates.get(3).copied().unwrap_or(0.0);
        let coord = match dims {
            Some(dims) if dims == Dimensions::M => Coord::xyzm(x, y, 0.0, third),
            _ => Coord::xyzm(x, y, third, fourth),
        };
        Ok(coord)
    }
}

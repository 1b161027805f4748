use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ndarray::Array3;

use crate::obj::text_lines;
use crate::{ImportError, Material, MaterialErrorPolicy};

/// Load every material defined in an MTL library.
///
/// Texture paths are resolved relative to the library's folder.
///
/// # Arguments
///
/// * `path` - MTL file.
/// * `policy` - How faulty material statements are handled.
///
/// # Returns
/// The materials in definition order.
pub fn load_mtl<P: AsRef<Path>>(
    path: P,
    policy: MaterialErrorPolicy,
) -> Result<Vec<Material>, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| ImportError::io(path, err))?;
    parse_mtl(BufReader::new(file), path, policy)
}

/// Parse an MTL library from a reader.
///
/// `source` is the path the content was read from. It is only used to resolve texture paths and
/// to report I/O errors.
pub fn parse_mtl<R: BufRead>(
    reader: R,
    source: &Path,
    policy: MaterialErrorPolicy,
) -> Result<Vec<Material>, ImportError> {
    let base_dir = source.parent().unwrap_or_else(|| Path::new(""));
    let mut parser = MtlParser {
        base_dir,
        materials: Vec::new(),
        open: false,
    };

    for (index, line) in text_lines(reader).enumerate() {
        let line = line.map_err(|err| ImportError::io(source, err))?;
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let args = tokens.collect::<Vec<_>>();

        if let Err(err) = parser.statement(index + 1, keyword, &args) {
            policy.handle(err)?;
        }
    }

    log::debug!(
        "Loaded {} materials from {}",
        parser.materials.len(),
        source.display()
    );

    Ok(parser.materials)
}

struct MtlParser<'a> {
    base_dir: &'a Path,
    materials: Vec<Material>,
    /// Whether the last `newmtl` succeeded, so properties have a material to attach to.
    open: bool,
}

impl MtlParser<'_> {
    fn statement(&mut self, line: usize, keyword: &str, args: &[&str]) -> Result<(), ImportError> {
        match keyword {
            "newmtl" => {
                self.open = false;
                let name = args
                    .first()
                    .ok_or_else(|| ImportError::parse(line, "`newmtl` without a name"))?;
                self.materials.push(Material::new(*name));
                self.open = true;
            }
            "Ka" => self.current(line, keyword)?.ambient = Some(parse_color(line, args)?),
            "Kd" => self.current(line, keyword)?.diffuse = Some(parse_color(line, args)?),
            "Ks" => self.current(line, keyword)?.specular = Some(parse_color(line, args)?),
            "Ns" => {
                let value = args
                    .first()
                    .ok_or_else(|| ImportError::parse(line, "`Ns` without a value"))?;
                let value = parse_float(line, value)?;
                self.current(line, keyword)?.shininess = Some(value);
            }
            "map_Ka" | "map_Kd" | "map_Ks" => {
                self.current(line, keyword)?;
                let texture = self.load_texture(line, keyword, args)?;
                let material = self.current(line, keyword)?;
                match keyword {
                    "map_Ka" => material.ambient_texture = Some(texture),
                    "map_Kd" => material.diffuse_texture = Some(texture),
                    _ => material.specular_texture = Some(texture),
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn current(&mut self, line: usize, keyword: &str) -> Result<&mut Material, ImportError> {
        let material = if self.open {
            self.materials.last_mut()
        } else {
            None
        };

        material.ok_or_else(|| ImportError::OrphanProperty {
            line,
            statement: keyword.to_string(),
        })
    }

    fn load_texture(
        &self,
        line: usize,
        keyword: &str,
        args: &[&str],
    ) -> Result<Array3<u8>, ImportError> {
        // Map statements may carry options before the file name.
        let file = args
            .last()
            .ok_or_else(|| ImportError::parse(line, format!("`{keyword}` without a file")))?;
        let path = self.base_dir.join(file.replace('\\', "/"));
        load_texture(&path)
    }
}

/// Decode a texture image as a `[height, width, 3]` RGB array.
pub fn load_texture(path: &Path) -> Result<Array3<u8>, ImportError> {
    let texture_err = |message: String| ImportError::Texture {
        path: PathBuf::from(path),
        message,
    };

    let image = image::open(path).map_err(|err| texture_err(err.to_string()))?;
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();

    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .map_err(|err| texture_err(err.to_string()))
}

/// Parse `r [g b]`. A single component is repeated.
fn parse_color(line: usize, args: &[&str]) -> Result<[f32; 3], ImportError> {
    match args {
        [value] => {
            let value = parse_float(line, value)?;
            Ok([value; 3])
        }
        [r, g, b, ..] => Ok([
            parse_float(line, r)?,
            parse_float(line, g)?,
            parse_float(line, b)?,
        ]),
        _ => Err(ImportError::parse(
            line,
            format!("expected 1 or 3 color components, got {}", args.len()),
        )),
    }
}

fn parse_float(line: usize, value: &str) -> Result<f32, ImportError> {
    value
        .parse::<f32>()
        .map_err(|err| ImportError::parse(line, format!("invalid number `{value}`: {err}")))
}

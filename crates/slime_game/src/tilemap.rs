//! Tilesets, tile grids and the tilemap description loader.
//!
//! A tilemap description names the tileset image, the tileset's region in
//! that image as `"x y width height"`, the per-tile size, and the grid as
//! text with one row per line:
//!
//! ```json
//! {
//!   "tileset": { "texture": "images/atlas.png", "region": "0 40 80 80",
//!                "tile_width": 20, "tile_height": 20 },
//!   "tiles": "00 01 01 02\n03 04 04 05\n06 07 07 08"
//! }
//! ```
//!
//! Tile ids are validated eagerly: a loaded [`Tilemap`] only ever holds ids
//! its tileset can resolve, so drawing never fails.

use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::content::ImageProvider;
use crate::error::LoadError;
use crate::region::TextureRegion;
use crate::render::{Color, DrawParams, Flip, Renderer};

/// A region sliced into equal cells, numbered row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    region: TextureRegion,
    tile_width: u32,
    tile_height: u32,
    columns: u32,
    rows: u32,
    tiles: Vec<TextureRegion>,
}

impl Tileset {
    pub fn new(region: TextureRegion, tile_width: u32, tile_height: u32) -> Result<Self, LoadError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(LoadError::InvalidRegion {
                name: "tileset".to_string(),
                reason: format!("tile size {tile_width}x{tile_height} must be > 0"),
            });
        }
        if region.width() % tile_width != 0 || region.height() % tile_height != 0 {
            return Err(LoadError::InvalidRegion {
                name: "tileset".to_string(),
                reason: format!(
                    "region {}x{} is not a whole number of {tile_width}x{tile_height} tiles",
                    region.width(),
                    region.height()
                ),
            });
        }

        let columns = region.width() / tile_width;
        let rows = region.height() / tile_height;
        let origin = region.source();
        let mut tiles = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                let id = row * columns + column;
                tiles.push(TextureRegion::new(
                    &format!("tile {id}"),
                    region.image(),
                    origin.x + column * tile_width,
                    origin.y + row * tile_height,
                    tile_width,
                    tile_height,
                )?);
            }
        }

        Ok(Self {
            region,
            tile_width,
            tile_height,
            columns,
            rows,
            tiles,
        })
    }

    pub fn region(&self) -> &TextureRegion {
        &self.region
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, id: u32) -> Option<&TextureRegion> {
        self.tiles.get(id as usize)
    }
}

#[derive(Debug, Clone)]
pub struct Tilemap {
    tileset: Rc<Tileset>,
    columns: usize,
    rows: usize,
    tiles: Vec<u32>,
    scale: Vec2,
}

impl Tilemap {
    /// Every cell starts at tile id 0.
    pub fn new(tileset: Rc<Tileset>, columns: usize, rows: usize) -> Result<Self, LoadError> {
        if columns == 0 || rows == 0 {
            return Err(LoadError::malformed(format!(
                "tilemap must have at least one column and row, got {columns}x{rows}"
            )));
        }
        Ok(Self {
            tileset,
            columns,
            rows,
            tiles: vec![0; columns * rows],
            scale: Vec2::ONE,
        })
    }

    pub fn tileset(&self) -> &Rc<Tileset> {
        &self.tileset
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn count(&self) -> usize {
        self.tiles.len()
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    /// Drawn width of one cell.
    pub fn tile_width(&self) -> f32 {
        self.tileset.tile_width() as f32 * self.scale.x
    }

    pub fn tile_height(&self) -> f32 {
        self.tileset.tile_height() as f32 * self.scale.y
    }

    /// Drawn size of the whole grid.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.tile_width(),
            self.rows as f32 * self.tile_height(),
        )
    }

    pub fn set_tile(&mut self, column: usize, row: usize, id: u32) -> Result<(), LoadError> {
        if column >= self.columns || row >= self.rows {
            return Err(LoadError::malformed(format!(
                "cell ({column}, {row}) is outside a {}x{} tilemap",
                self.columns, self.rows
            )));
        }
        if self.tileset.tile(id).is_none() {
            return Err(LoadError::OutOfRangeTile {
                column,
                row,
                id,
                tile_count: self.tileset.count(),
            });
        }
        self.tiles[row * self.columns + column] = id;
        Ok(())
    }

    pub fn tile_id(&self, column: usize, row: usize) -> Option<u32> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.tiles[row * self.columns + column])
    }

    pub fn tile(&self, column: usize, row: usize) -> Option<&TextureRegion> {
        self.tile_id(column, row).and_then(|id| self.tileset.tile(id))
    }

    /// Region for the cell at row-major `index`.
    pub fn tile_at(&self, index: usize) -> Option<&TextureRegion> {
        self.tiles.get(index).and_then(|&id| self.tileset.tile(id))
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let params = DrawParams {
            tint: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: self.scale,
            flip: Flip::default(),
            depth: 1.0,
        };
        let (tile_width, tile_height) = (self.tile_width(), self.tile_height());

        for (index, &id) in self.tiles.iter().enumerate() {
            // Ids are validated on insert.
            let Some(tile) = self.tileset.tile(id) else {
                continue;
            };
            let column = index % self.columns;
            let row = index / self.columns;
            let position = Vec2::new(column as f32 * tile_width, row as f32 * tile_height);
            tile.draw(renderer, position, &params);
        }
    }
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct TilemapFileJson {
    tileset: Option<TilesetJson>,
    tiles: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TilesetJson {
    texture: Option<String>,
    region: Option<String>,
    tile_width: Option<u32>,
    tile_height: Option<u32>,
}

pub fn load_tilemap_from_path(
    path: &Path,
    images: &mut dyn ImageProvider,
) -> Result<Tilemap, LoadError> {
    let raw = fs::read_to_string(path).map_err(|e| LoadError::io(&path.display().to_string(), e))?;
    let tilemap = load_tilemap_from_str(&raw, images)?;
    log::info!(
        "Loaded tilemap '{}' ({}x{} cells, {} tileset tiles)",
        path.display(),
        tilemap.columns(),
        tilemap.rows(),
        tilemap.tileset().count()
    );
    Ok(tilemap)
}

pub fn load_tilemap_from_str(
    raw: &str,
    images: &mut dyn ImageProvider,
) -> Result<Tilemap, LoadError> {
    let json: TilemapFileJson = serde_json::from_str(raw)
        .map_err(|e| LoadError::malformed(format!("tilemap description: {e}")))?;

    let tileset_json = json
        .tileset
        .ok_or_else(|| LoadError::malformed("tilemap description has no tileset"))?;
    let texture_path = tileset_json
        .texture
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .ok_or_else(|| LoadError::malformed("tileset has no texture path"))?;
    let region_text = tileset_json
        .region
        .as_deref()
        .ok_or_else(|| LoadError::malformed("tileset has no region"))?;
    let [x, y, width, height] = parse_region(region_text)?;
    let tile_width = tileset_json
        .tile_width
        .ok_or_else(|| LoadError::malformed("tileset has no tile_width"))?;
    let tile_height = tileset_json
        .tile_height
        .ok_or_else(|| LoadError::malformed("tileset has no tile_height"))?;

    let image = images.load_image(texture_path)?;
    let region = TextureRegion::new("tileset", &image, x, y, width, height)?;
    let tileset = Rc::new(Tileset::new(region, tile_width, tile_height)?);

    let grid_text = json
        .tiles
        .ok_or_else(|| LoadError::malformed("tilemap description has no tiles"))?;
    let grid = parse_grid(&grid_text)?;
    let columns = grid[0].len();

    let mut tilemap = Tilemap::new(tileset, columns, grid.len())?;
    for (row, ids) in grid.iter().enumerate() {
        for (column, &id) in ids.iter().enumerate() {
            tilemap.set_tile(column, row, id)?;
        }
    }
    Ok(tilemap)
}

fn parse_region(text: &str) -> Result<[u32; 4], LoadError> {
    let values = text
        .split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|e| {
                LoadError::malformed(format!("tileset region value '{token}': {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        &[x, y, width, height] => Ok([x, y, width, height]),
        _ => Err(LoadError::malformed(format!(
            "tileset region must be 'x y width height', got '{text}'"
        ))),
    }
}

/// Rows of ids, one per line; the first row fixes the column count.
/// Surrounding blank lines are ignored, an interior one is an empty row.
fn parse_grid(text: &str) -> Result<Vec<Vec<u32>>, LoadError> {
    let mut grid: Vec<Vec<u32>> = Vec::new();

    for (row, line) in text.trim().lines().enumerate() {
        let ids = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|e| {
                    LoadError::malformed(format!("tile id '{token}' in row {row}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = grid.first() {
            if ids.len() != first.len() {
                return Err(LoadError::InconsistentRowLength {
                    row,
                    expected: first.len(),
                    found: ids.len(),
                });
            }
        }
        grid.push(ids);
    }

    if grid.is_empty() {
        return Err(LoadError::malformed("tile grid is empty"));
    }
    Ok(grid)
}

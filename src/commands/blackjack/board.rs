use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::deck::Card;
use crate::errors::BoardError;

pub const BOARD_WIDTH: u32 = 616;
pub const BOARD_HEIGHT: u32 = 360;
const CARD_WIDTH: u32 = 72;
const CARD_HEIGHT: u32 = 100;

const DEALER_ROW: (i64, i64) = (152, 44);
const PLAYER_ROW: (i64, i64) = (396, 214);

const FELT_PIXEL: Rgba<u8> = Rgba([0x35, 0x65, 0x4D, 0xFF]);
const CARD_BACK_PIXEL: Rgba<u8> = Rgba([0x28, 0x28, 0x28, 0xFF]);
const CARD_FACE_PIXEL: Rgba<u8> = Rgba([0xF4, 0xF0, 0xE6, 0xFF]);

/// Composites the table image: dealer hand across the top, player hand
/// across the bottom, with the dealer's hole card face down until the
/// round is resolved.
///
/// Sprites are loaded from an assets directory laid out as
/// `<assets>/board.png` and `<assets>/cards/<rank>_of_<suit>.png`; any
/// missing file degrades to a flat-colour placeholder so the table still
/// renders on a bare checkout.
pub struct BoardRenderer {
    assets: PathBuf,
}

impl BoardRenderer {
    pub fn new(assets: impl Into<PathBuf>) -> Self {
        Self {
            assets: assets.into(),
        }
    }

    /// Renders the board to PNG bytes. `hide_hole_card` shows the dealer's
    /// first card plus a face-down back instead of the real hand.
    pub fn compose(
        &self,
        player: &[Card],
        dealer: &[Card],
        hide_hole_card: bool,
    ) -> Result<Vec<u8>, BoardError> {
        let mut canvas = self.background();

        if hide_hole_card {
            let shown: Vec<&Card> = dealer.first().into_iter().collect();
            self.draw_hand(&mut canvas, &shown, DEALER_ROW, 1);
            let back = self.back_sprite();
            let (x, y) = DEALER_ROW;
            imageops::overlay(&mut canvas, &back, x + i64::from(CARD_WIDTH), y);
        } else {
            let shown: Vec<&Card> = dealer.iter().collect();
            self.draw_hand(&mut canvas, &shown, DEALER_ROW, 1);
        }

        let shown: Vec<&Card> = player.iter().collect();
        self.draw_hand(&mut canvas, &shown, PLAYER_ROW, -1);

        encode_png(canvas)
    }

    /// Dealer cards fan left-to-right, player cards right-to-left, mirroring
    /// the two corners of the table.
    fn draw_hand(&self, canvas: &mut RgbaImage, hand: &[&Card], start: (i64, i64), direction: i64) {
        let (mut x, y) = start;
        for card in hand {
            let sprite = self.card_sprite(card);
            imageops::overlay(canvas, &sprite, x, y);
            x += direction * i64::from(CARD_WIDTH);
        }
    }

    fn background(&self) -> RgbaImage {
        load_sized(
            &self.assets.join("board.png"),
            BOARD_WIDTH,
            BOARD_HEIGHT,
        )
        .unwrap_or_else(|| RgbaImage::from_pixel(BOARD_WIDTH, BOARD_HEIGHT, FELT_PIXEL))
    }

    fn card_sprite(&self, card: &Card) -> RgbaImage {
        load_sized(
            &self.assets.join("cards").join(card.sprite_name()),
            CARD_WIDTH,
            CARD_HEIGHT,
        )
        .unwrap_or_else(|| RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, CARD_FACE_PIXEL))
    }

    fn back_sprite(&self) -> RgbaImage {
        load_sized(
            &self.assets.join("cards").join("back.png"),
            CARD_WIDTH,
            CARD_HEIGHT,
        )
        .unwrap_or_else(|| RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, CARD_BACK_PIXEL))
    }
}

fn load_sized(path: &Path, width: u32, height: u32) -> Option<RgbaImage> {
    let loaded = image::open(path).ok()?.to_rgba8();
    if loaded.dimensions() == (width, height) {
        return Some(loaded);
    }
    Some(imageops::resize(
        &loaded,
        width,
        height,
        imageops::FilterType::Triangle,
    ))
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, BoardError> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas).write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::blackjack::deck::{RANKS, Suit};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample_hand() -> Vec<Card> {
        vec![
            Card {
                suit: Suit::Spades,
                rank: RANKS[0],
            },
            Card {
                suit: Suit::Hearts,
                rank: RANKS[12],
            },
        ]
    }

    #[test]
    fn composes_a_png_without_assets_on_disk() {
        let renderer = BoardRenderer::new("definitely/not/a/real/assets/dir");
        let bytes = renderer
            .compose(&sample_hand(), &sample_hand(), true)
            .unwrap();
        assert!(bytes.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn revealed_and_hidden_boards_both_render() {
        let renderer = BoardRenderer::new("definitely/not/a/real/assets/dir");
        let hidden = renderer.compose(&sample_hand(), &sample_hand(), true).unwrap();
        let revealed = renderer
            .compose(&sample_hand(), &sample_hand(), false)
            .unwrap();
        assert!(!hidden.is_empty());
        assert!(!revealed.is_empty());
    }
}

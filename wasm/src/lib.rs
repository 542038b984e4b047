use minesweeper_ai as ms;
use wasm_bindgen::prelude::*;

const HIDDEN: i8 = -1;
const FLAGGED: i8 = -2;
const EXPLODED: i8 = -3;

fn load(bts: &[u8]) -> Result<ms::Game, String> {
    ms::Game::deserialize(bts).map_err(|e| e.to_string())
}

fn store(game: &ms::Game) -> Result<Vec<u8>, String> {
    game.serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn create_game(height: u8, width: u8, mines: u16) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let bounds = ms::Bounds::new(height as usize, width as usize);
    let board = ms::Minesweeper::random(bounds, mines as usize, &mut rand::rng())
        .map_err(|e| e.to_string())?;
    store(&ms::Game::new(board))
}

/// Lets the bot make one move.
#[wasm_bindgen]
pub fn step(bts: Vec<u8>) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut game = load(&bts)?;
    game.step(&mut rand::rng()).map_err(|e| e.to_string())?;
    store(&game)
}

#[wasm_bindgen]
pub fn reveal(bts: Vec<u8>, row: usize, col: usize) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut game = load(&bts)?;
    game.reveal(ms::Cell::new(row, col))
        .map_err(|e| e.to_string())?;
    store(&game)
}

/// 0 while playing, 1 once won, 2 once lost.
#[wasm_bindgen]
pub fn game_state(bts: Vec<u8>) -> Result<u8, String> {
    console_error_panic_hook::set_once();

    let game = load(&bts)?;
    Ok(match game.state() {
        ms::GameState::Playing => 0,
        ms::GameState::Won => 1,
        ms::GameState::Lost => 2,
    })
}

/// The visible board in row-major order.
#[wasm_bindgen]
pub fn get_cells(bts: Vec<u8>) -> Result<Vec<i8>, String> {
    console_error_panic_hook::set_once();

    let game = load(&bts)?;
    Ok(game
        .bounds()
        .cells()
        .map(|cell| {
            if game.exploded() == Some(cell) {
                EXPLODED
            } else if let Some(&count) = game.revealed().get(&cell) {
                count as i8
            } else if game.ai().mines().contains(&cell) {
                FLAGGED
            } else {
                HIDDEN
            }
        })
        .collect())
}

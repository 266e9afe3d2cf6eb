//! Mode-specific screens. Pure functions of game state onto a [`Canvas`].

use alloc::format;

use super::assets::{BADGE_CROSS, BADGE_DASHBOARD, CHECK, CROSS};
use super::canvas::{Align, Canvas, Font};
use crate::constants::DEATH_WAIT;
use crate::sim::Game;
use crate::types::Mode;

const CENTER_X: i32 = 64;
const HEADER_Y: i32 = 0;
const LINE1_Y: i32 = 15;
const LINE2_Y: i32 = 24;

pub fn draw<R, C: Canvas + ?Sized>(game: &Game<R>, canvas: &mut C) {
    match game.mode() {
        Mode::Menu => {
            header(canvas, "Snake");
            line1(canvas, "Would you like");
            line2(canvas, "to play?");
            canvas.draw_bitmap(&CROSS, 3, 12);
            canvas.draw_bitmap(&CHECK, 117, 13);
        }
        Mode::Playing => {
            snake(game, canvas);
            coins(game, canvas);
        }
        Mode::Paused => {
            header(canvas, "PAUSED");
            canvas.draw_bitmap(&BADGE_DASHBOARD, 1, 9);
            canvas.draw_bitmap(&BADGE_CROSS, 113, 9);
            stats(game, canvas);
        }
        Mode::Dead { dead_tick } if dead_tick == DEATH_WAIT => {
            header(canvas, "GAME OVER");
            stats(game, canvas);
        }
        Mode::Dead { dead_tick } => {
            // 4 ticks shown, 4 hidden
            if dead_tick % 8 <= 3 {
                snake(game, canvas);
            }
            coins(game, canvas);
        }
    }
}

fn header<C: Canvas + ?Sized>(canvas: &mut C, text: &str) {
    canvas.draw_text(text, CENTER_X, HEADER_Y, Align::TOP_CENTER, Font::Heading);
}

fn line1<C: Canvas + ?Sized>(canvas: &mut C, text: &str) {
    canvas.draw_text(text, CENTER_X, LINE1_Y, Align::TOP_CENTER, Font::Body);
}

fn line2<C: Canvas + ?Sized>(canvas: &mut C, text: &str) {
    canvas.draw_text(text, CENTER_X, LINE2_Y, Align::TOP_CENTER, Font::Body);
}

fn snake<R, C: Canvas + ?Sized>(game: &Game<R>, canvas: &mut C) {
    for pos in game.snake().iter() {
        canvas.set_pixel(pos.x as i32, pos.y as i32, true);
    }
}

fn coins<R, C: Canvas + ?Sized>(game: &Game<R>, canvas: &mut C) {
    for pos in game.coins().iter() {
        canvas.set_pixel(pos.x as i32, pos.y as i32, true);
    }
}

// Line 2 is wider than the panel once the timer passes a few seconds; the
// canvas clips it.
fn stats<R, C: Canvas + ?Sized>(game: &Game<R>, canvas: &mut C) {
    let snake = game.snake();
    line1(canvas, &format!("length: {}", snake.target_length()));
    line2(
        canvas,
        &format!(
            "speed: {}, time: {}ms",
            snake.speed(),
            game.clock().elapsed_ms()
        ),
    );
}

//! Drive LCD1602 with a STM32F411RET6 in 8 Pin Mode, through two daisy-chained 74HC595
//!
//! Wiring diagram
//!
//! 74HC595 #0 <-> STM32F411RET6
//!         SER <-> PB0
//!       SRCLK <-> PB1 (also SRCLK of #1)
//!        RCLK <-> PB2 (also RCLK of #1)
//!         Q7' <-> SER of #1
//!
//! 74HC595 #0 outputs Q0..Q7 (lines 0..7)   <-> LCD DB0..DB7
//! 74HC595 #1 outputs Q0, Q1, Q2 (lines 8..10) <-> LCD RS, RW, EN

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::rtt_init_print;
use stm32f4xx_hal::{pac, prelude::*};

use hd44780_ext::{
    command::Font, lcd::Lcd, line_driver::ShiftRegisterLines, sender::ParallelSender,
};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let lines: ShiftRegisterLines<_, _, _, 2> = ShiftRegisterLines::new(
        gpiob.pb0.into_push_pull_output().erase(),
        gpiob.pb1.into_push_pull_output().erase(),
        gpiob.pb2.into_push_pull_output().erase(),
    );

    let mut sender =
        ParallelSender::new_8pin_rw(lines, 8, 9, 10, [0, 1, 2, 3, 4, 5, 6, 7]);

    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    lcd.begin(20, 4, Font::Font5x8).unwrap();

    for row in 0..4 {
        lcd.set_cursor(0, row).unwrap();
        write!(lcd, "row {} of a 20x4", row).unwrap();
    }

    lcd.delay_ms(2_000);
    lcd.autoscroll().unwrap();
    lcd.set_cursor(19, 3).unwrap();
    lcd.print(" scrolling").unwrap();

    #[allow(clippy::empty_loop)]
    loop {}
}

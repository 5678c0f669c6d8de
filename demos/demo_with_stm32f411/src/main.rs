//! Drive LCD1602 with a STM32F411RET6 in 4 Pin Mode, every LCD pin on a MCU pin
//!
//! this demo use most of the controller functions intentionally, to test functions works just fine.

//! Wiring diagram
//!
//! LCD1602 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!      V0 <-> potentiometer <-> 5V (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> PA1
//!      EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA3
//!      D5 <-> PA4
//!      D6 <-> PA5
//!      D7 <-> PA6
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::rtt_init_print;
use stm32f4xx_hal::{pac, prelude::*};

use hd44780_ext::{command::Font, lcd::Lcd, line_driver::NativePins, sender::ParallelSender};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    // init needed digital pins

    let gpioa = dp.GPIOA.split();

    // line n is the n-th pin, so they should share one (erased) type
    let lines = NativePins::new([
        gpioa.pa0.into_push_pull_output().erase(),
        gpioa.pa1.into_push_pull_output().erase(),
        gpioa.pa2.into_push_pull_output().erase(),
        gpioa.pa3.into_push_pull_output().erase(),
        gpioa.pa4.into_push_pull_output().erase(),
        gpioa.pa5.into_push_pull_output().erase(),
        gpioa.pa6.into_push_pull_output().erase(),
    ]);

    // RS, RW, EN, then DB4..DB7
    let mut sender = ParallelSender::new_4pin_rw(lines, 0, 1, 2, [3, 4, 5, 6]);

    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    // init LCD1602
    lcd.begin(16, 2, Font::Font5x8).unwrap();

    // draw a little heart in CGRAM, and put it at the end of the first line
    lcd.create_char(1, &HEART).unwrap();
    lcd.set_cursor(15, 0).unwrap();
    lcd.write(1).unwrap();

    lcd.set_cursor(0, 0).unwrap();
    lcd.print("hello, world!").unwrap();

    // to test formatted output
    lcd.set_cursor(0, 1).unwrap();
    write!(lcd, "{:>3}%", 42).unwrap();

    lcd.cursor().unwrap();
    lcd.blink().unwrap();

    // to test right to left write in
    lcd.right_to_left().unwrap();
    lcd.set_cursor(15, 1).unwrap();
    lcd.print("!~").unwrap();
    lcd.left_to_right().unwrap();

    lcd.no_blink().unwrap();
    lcd.no_cursor().unwrap();

    // shift display window back and forth
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_display_left().unwrap();
    }
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_display_right().unwrap();
    }

    // and blinking display 3 times
    for _ in 0..3 {
        lcd.delay_ms(500);
        lcd.no_display().unwrap();
        lcd.delay_ms(500);
        lcd.display().unwrap();
    }

    #[allow(clippy::empty_loop)]
    loop {}
}

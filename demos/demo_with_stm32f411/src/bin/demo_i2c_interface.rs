//! Drive LCD1602 with a STM32F411RET6, through a PCF8574T "I2C backpack"
//!
//! Wiring diagram
//!
//! Backpack <-> STM32F411RET6
//!      GND <-> GND
//!      VCC <-> 5V
//!      SDA <-> PB7
//!      SCL <-> PB6

#![no_std]
#![no_main]

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};
use ufmt::uwrite;

use hd44780_ext::{command::Font, lcd::Lcd, line_driver::Pcf8574Lines, sender::ParallelSender};

type Backpack<'a> = Pcf8574Lines<&'a mut I2c<pac::I2C1>>;

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
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let mut i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    // every backpack line is one bit of the PCF8574 output byte
    let lines: Backpack = Pcf8574Lines::new(&mut i2c, 0x27);
    let mut sender = ParallelSender::new_4pin_rw(
        lines,
        Backpack::P_RS,
        Backpack::P_RW,
        Backpack::P_EN,
        Backpack::P_DB,
    )
    .with_backlight(Backpack::P_BL);

    let mut lcd = Lcd::new(&mut sender, &mut delayer);

    // init LCD1602
    if let Err(e) = lcd.begin(16, 2, Font::Font5x8) {
        rprintln!("LCD init failed: {}", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    lcd.backlight().unwrap();

    lcd.create_char(0, &HEART).unwrap();

    lcd.print("I2C backpack ").unwrap();
    lcd.write(0).unwrap();

    // count up on the second line
    for count in 0..=100u8 {
        lcd.set_cursor(0, 1).unwrap();
        uwrite!(lcd, "{}%", count).unwrap();
        lcd.delay_ms(100);
    }

    // blink backlight 3 times
    for _ in 0..3 {
        lcd.delay_ms(500);
        lcd.no_backlight().unwrap();
        lcd.delay_ms(500);
        lcd.backlight().unwrap();
    }

    #[allow(clippy::empty_loop)]
    loop {}
}

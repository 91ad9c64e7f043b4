//! Exact rational points on the unit circle for every integer degree.
//!
//! Each entry is a Pythagorean triple `(rise, run, hypotenuse)` with
//! `rise² + run² == hypotenuse²`, so `(run/hyp, rise/hyp)` lies *exactly* on the
//! unit circle while approximating `(cos θ, sin θ)` to within 0.05°.
//! Quadrant multiples (0°, 90°, 180°, 270°) are exact.

use crate::rational_types::{Rational, rational};

/// A rational angle: `sin = rise / hypotenuse`, `cos = run / hypotenuse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalAngle {
    pub degrees: u32,
    pub rise: i64,
    pub run: i64,
    pub hypotenuse: i64,
}

impl RationalAngle {
    pub fn sin(&self) -> Rational {
        rational(self.rise, self.hypotenuse)
    }

    pub fn cos(&self) -> Rational {
        rational(self.run, self.hypotenuse)
    }
}

/// Look up the rational approximation of `degrees`, normalized into `0..360`.
pub fn find_rational_angle(degrees: i32) -> RationalAngle {
    let degrees = degrees.rem_euclid(360) as u32;
    let (rise, run, hypotenuse) = RATIONAL_CIRCLE[degrees as usize];
    RationalAngle { degrees, rise, run, hypotenuse }
}

/// `(rise, run, hypotenuse)` indexed by degree.
#[rustfmt::skip]
pub const RATIONAL_CIRCLE: [(i64, i64, i64); 360] = [
    (0, 1, 1), (111, 6160, 6161), (57, 1624, 1625), (76, 1443, 1445),
    (228, 3245, 3253), (23, 264, 265), (19, 180, 181), (147, 1196, 1205),
    (129, 920, 929), (228, 1435, 1453), (285, 1612, 1637), (511, 2640, 2689),
    (76, 357, 365), (280, 1209, 1241), (399, 1600, 1649), (371, 1380, 1429),
    (912, 3185, 3313), (1131, 3700, 3869), (1260, 3869, 4069), (3725, 10788, 11413),
    (51, 140, 149), (135, 352, 377), (504, 1247, 1345), (1188, 2795, 3037),
    (231, 520, 569), (2825, 6072, 6697), (39, 80, 89), (300, 589, 661),
    (12155, 22908, 25933), (1740, 3139, 3589), (451, 780, 901), (180, 299, 349),
    (2929, 4680, 5521), (432, 665, 793), (735, 1088, 1313), (1679, 2400, 2929),
    (1040, 1431, 1769), (24448, 32385, 40577), (1281, 1640, 2081), (1495, 1848, 2377),
    (88, 105, 137), (2573, 2964, 3925), (4088, 4545, 6113), (429, 460, 629),
    (893, 924, 1285), (696, 697, 985), (924, 893, 1285), (460, 429, 629),
    (4545, 4088, 6113), (2964, 2573, 3925), (105, 88, 137), (1848, 1495, 2377),
    (1640, 1281, 2081), (32385, 24448, 40577), (1431, 1040, 1769), (2400, 1679, 2929),
    (1088, 735, 1313), (665, 432, 793), (4680, 2929, 5521), (299, 180, 349),
    (780, 451, 901), (3139, 1740, 3589), (22908, 12155, 25933), (589, 300, 661),
    (80, 39, 89), (6072, 2825, 6697), (520, 231, 569), (2795, 1188, 3037),
    (1247, 504, 1345), (352, 135, 377), (140, 51, 149), (10788, 3725, 11413),
    (3869, 1260, 4069), (3700, 1131, 3869), (3185, 912, 3313), (1380, 371, 1429),
    (1600, 399, 1649), (1209, 280, 1241), (357, 76, 365), (2640, 511, 2689),
    (1612, 285, 1637), (1435, 228, 1453), (920, 129, 929), (1196, 147, 1205),
    (180, 19, 181), (264, 23, 265), (3245, 228, 3253), (1443, 76, 1445),
    (1624, 57, 1625), (6160, 111, 6161), (1, 0, 1), (6160, -111, 6161),
    (1624, -57, 1625), (1443, -76, 1445), (3245, -228, 3253), (264, -23, 265),
    (180, -19, 181), (1196, -147, 1205), (920, -129, 929), (1435, -228, 1453),
    (1612, -285, 1637), (2640, -511, 2689), (357, -76, 365), (1209, -280, 1241),
    (1600, -399, 1649), (1380, -371, 1429), (3185, -912, 3313), (3700, -1131, 3869),
    (3869, -1260, 4069), (10788, -3725, 11413), (140, -51, 149), (352, -135, 377),
    (1247, -504, 1345), (2795, -1188, 3037), (520, -231, 569), (6072, -2825, 6697),
    (80, -39, 89), (589, -300, 661), (22908, -12155, 25933), (3139, -1740, 3589),
    (780, -451, 901), (299, -180, 349), (4680, -2929, 5521), (665, -432, 793),
    (1088, -735, 1313), (2400, -1679, 2929), (1431, -1040, 1769), (32385, -24448, 40577),
    (1640, -1281, 2081), (1848, -1495, 2377), (105, -88, 137), (2964, -2573, 3925),
    (4545, -4088, 6113), (460, -429, 629), (924, -893, 1285), (697, -696, 985),
    (893, -924, 1285), (429, -460, 629), (4088, -4545, 6113), (2573, -2964, 3925),
    (88, -105, 137), (1495, -1848, 2377), (1281, -1640, 2081), (24448, -32385, 40577),
    (1040, -1431, 1769), (1679, -2400, 2929), (735, -1088, 1313), (432, -665, 793),
    (2929, -4680, 5521), (180, -299, 349), (451, -780, 901), (1740, -3139, 3589),
    (12155, -22908, 25933), (300, -589, 661), (39, -80, 89), (2825, -6072, 6697),
    (231, -520, 569), (1188, -2795, 3037), (504, -1247, 1345), (135, -352, 377),
    (51, -140, 149), (3725, -10788, 11413), (1260, -3869, 4069), (1131, -3700, 3869),
    (912, -3185, 3313), (371, -1380, 1429), (399, -1600, 1649), (280, -1209, 1241),
    (76, -357, 365), (511, -2640, 2689), (285, -1612, 1637), (228, -1435, 1453),
    (129, -920, 929), (147, -1196, 1205), (19, -180, 181), (23, -264, 265),
    (228, -3245, 3253), (76, -1443, 1445), (57, -1624, 1625), (111, -6160, 6161),
    (0, -1, 1), (-111, -6160, 6161), (-57, -1624, 1625), (-76, -1443, 1445),
    (-228, -3245, 3253), (-23, -264, 265), (-19, -180, 181), (-147, -1196, 1205),
    (-129, -920, 929), (-228, -1435, 1453), (-285, -1612, 1637), (-511, -2640, 2689),
    (-76, -357, 365), (-280, -1209, 1241), (-399, -1600, 1649), (-371, -1380, 1429),
    (-912, -3185, 3313), (-1131, -3700, 3869), (-1260, -3869, 4069), (-3725, -10788, 11413),
    (-51, -140, 149), (-135, -352, 377), (-504, -1247, 1345), (-1188, -2795, 3037),
    (-231, -520, 569), (-2825, -6072, 6697), (-39, -80, 89), (-300, -589, 661),
    (-12155, -22908, 25933), (-1740, -3139, 3589), (-451, -780, 901), (-180, -299, 349),
    (-2929, -4680, 5521), (-432, -665, 793), (-735, -1088, 1313), (-1679, -2400, 2929),
    (-1040, -1431, 1769), (-24448, -32385, 40577), (-1281, -1640, 2081), (-1495, -1848, 2377),
    (-88, -105, 137), (-2573, -2964, 3925), (-4088, -4545, 6113), (-429, -460, 629),
    (-893, -924, 1285), (-696, -697, 985), (-924, -893, 1285), (-460, -429, 629),
    (-4545, -4088, 6113), (-2964, -2573, 3925), (-105, -88, 137), (-1848, -1495, 2377),
    (-1640, -1281, 2081), (-32385, -24448, 40577), (-1431, -1040, 1769), (-2400, -1679, 2929),
    (-1088, -735, 1313), (-665, -432, 793), (-4680, -2929, 5521), (-299, -180, 349),
    (-780, -451, 901), (-3139, -1740, 3589), (-22908, -12155, 25933), (-589, -300, 661),
    (-80, -39, 89), (-6072, -2825, 6697), (-520, -231, 569), (-2795, -1188, 3037),
    (-1247, -504, 1345), (-352, -135, 377), (-140, -51, 149), (-10788, -3725, 11413),
    (-3869, -1260, 4069), (-3700, -1131, 3869), (-3185, -912, 3313), (-1380, -371, 1429),
    (-1600, -399, 1649), (-1209, -280, 1241), (-357, -76, 365), (-2640, -511, 2689),
    (-1612, -285, 1637), (-1435, -228, 1453), (-920, -129, 929), (-1196, -147, 1205),
    (-180, -19, 181), (-264, -23, 265), (-3245, -228, 3253), (-1443, -76, 1445),
    (-1624, -57, 1625), (-6160, -111, 6161), (-1, 0, 1), (-6160, 111, 6161),
    (-1624, 57, 1625), (-1443, 76, 1445), (-3245, 228, 3253), (-264, 23, 265),
    (-180, 19, 181), (-1196, 147, 1205), (-920, 129, 929), (-1435, 228, 1453),
    (-1612, 285, 1637), (-2640, 511, 2689), (-357, 76, 365), (-1209, 280, 1241),
    (-1600, 399, 1649), (-1380, 371, 1429), (-3185, 912, 3313), (-3700, 1131, 3869),
    (-3869, 1260, 4069), (-10788, 3725, 11413), (-140, 51, 149), (-352, 135, 377),
    (-1247, 504, 1345), (-2795, 1188, 3037), (-520, 231, 569), (-6072, 2825, 6697),
    (-80, 39, 89), (-589, 300, 661), (-22908, 12155, 25933), (-3139, 1740, 3589),
    (-780, 451, 901), (-299, 180, 349), (-4680, 2929, 5521), (-665, 432, 793),
    (-1088, 735, 1313), (-2400, 1679, 2929), (-1431, 1040, 1769), (-32385, 24448, 40577),
    (-1640, 1281, 2081), (-1848, 1495, 2377), (-105, 88, 137), (-2964, 2573, 3925),
    (-4545, 4088, 6113), (-460, 429, 629), (-924, 893, 1285), (-697, 696, 985),
    (-893, 924, 1285), (-429, 460, 629), (-4088, 4545, 6113), (-2573, 2964, 3925),
    (-88, 105, 137), (-1495, 1848, 2377), (-1281, 1640, 2081), (-24448, 32385, 40577),
    (-1040, 1431, 1769), (-1679, 2400, 2929), (-735, 1088, 1313), (-432, 665, 793),
    (-2929, 4680, 5521), (-180, 299, 349), (-451, 780, 901), (-1740, 3139, 3589),
    (-12155, 22908, 25933), (-300, 589, 661), (-39, 80, 89), (-2825, 6072, 6697),
    (-231, 520, 569), (-1188, 2795, 3037), (-504, 1247, 1345), (-135, 352, 377),
    (-51, 140, 149), (-3725, 10788, 11413), (-1260, 3869, 4069), (-1131, 3700, 3869),
    (-912, 3185, 3313), (-371, 1380, 1429), (-399, 1600, 1649), (-280, 1209, 1241),
    (-76, 357, 365), (-511, 2640, 2689), (-285, 1612, 1637), (-228, 1435, 1453),
    (-129, 920, 929), (-147, 1196, 1205), (-19, 180, 181), (-23, 264, 265),
    (-228, 3245, 3253), (-76, 1443, 1445), (-57, 1624, 1625), (-111, 6160, 6161),
];

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn every_entry_is_on_the_unit_circle() {
        for (deg, &(rise, run, hyp)) in RATIONAL_CIRCLE.iter().enumerate() {
            let (rise, run, hyp) = (BigInt::from(rise), BigInt::from(run), BigInt::from(hyp));
            assert_eq!(&rise * &rise + &run * &run, &hyp * &hyp, "degree {deg}");
        }
    }

    #[test]
    fn quadrants_are_exact() {
        assert_eq!(find_rational_angle(0).cos(), rational(1, 1));
        assert_eq!(find_rational_angle(90).sin(), rational(1, 1));
        assert_eq!(find_rational_angle(180).cos(), rational(-1, 1));
        assert_eq!(find_rational_angle(270).sin(), rational(-1, 1));
    }

    #[test]
    fn angles_are_normalized() {
        assert_eq!(find_rational_angle(-5), find_rational_angle(355));
        assert_eq!(find_rational_angle(725), find_rational_angle(5));
        assert_eq!(find_rational_angle(-5).degrees, 355);
    }

    #[test]
    fn approximation_is_close() {
        for deg in 0..360 {
            let angle = find_rational_angle(deg);
            let measured = (angle.rise as f64).atan2(angle.run as f64).to_degrees().rem_euclid(360.0);
            let diff = (measured - deg as f64).abs();
            assert!(diff.min(360.0 - diff) < 0.06, "degree {deg} measured {measured}");
        }
    }
}

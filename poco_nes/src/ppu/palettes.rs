/// NES system palette, 64 entries mapped to ARGB.
#[rustfmt::skip]
pub const PALETTES: [u32; 64] = [
    0xff66_6666, 0xff00_2a88, 0xff14_12a7, 0xff3b_00a4,
    0xff5c_007e, 0xff6e_0040, 0xff6c_0600, 0xff56_1d00,
    0xff33_3500, 0xff0b_4800, 0xff00_5200, 0xff00_4f08,
    0xff00_404d, 0xff00_0000, 0xff00_0000, 0xff00_0000,
    0xffad_adad, 0xff15_5fd9, 0xff42_40ff, 0xff75_27fe,
    0xffa0_1acc, 0xffb7_1e7b, 0xffb5_3120, 0xff99_4e00,
    0xff6b_6d00, 0xff38_8700, 0xff0c_9300, 0xff00_8f32,
    0xff00_7c8d, 0xff00_0000, 0xff00_0000, 0xff00_0000,
    0xffff_feff, 0xff64_b0ff, 0xff92_90ff, 0xffc6_76ff,
    0xfff3_6aff, 0xfffe_6ecc, 0xfffe_8170, 0xffea_9e22,
    0xffbc_be00, 0xff88_d800, 0xff5c_e430, 0xff45_e082,
    0xff48_cdde, 0xff4f_4f4f, 0xff00_0000, 0xff00_0000,
    0xffff_feff, 0xffc0_dfff, 0xffd3_d2ff, 0xffe8_c8ff,
    0xfffb_c2ff, 0xfffe_c4ea, 0xfffe_ccc5, 0xfff7_d8a5,
    0xffe4_e594, 0xffcf_ef96, 0xffbd_f4ab, 0xffb3_f3cc,
    0xffb5_ebf2, 0xffb8_b8b8, 0xff00_0000, 0xff00_0000,
];

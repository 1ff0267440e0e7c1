//! Known-answer vectors for Adiantum and HPolyC at every round count.
//!
//! These were computed with an independent reference implementation whose
//! ChaCha, HChaCha, AES and Poly1305 layers match their published test
//! vectors. They are not taken from the google/adiantum corpus.
//!
//! Inputs are generated from `pattern(len, mul, add)`, byte `i` being
//! `i * mul + add` truncated to 8 bits, so the vectors stay short.

use crate::{Hbsh, Variant};

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex.chars().filter(|c| !c.is_whitespace()).collect::<String>()).unwrap()
}

fn pattern(len: usize, mul: usize, add: usize) -> Vec<u8> {
    (0..len).map(|i| (i * mul + add) as u8).collect()
}

fn run_test_vector(
    name: &str,
    variant: Variant,
    rounds: usize,
    key: &[u8],
    tweak: &[u8],
    plaintext: &[u8],
    expected_ct_hex: &str,
) {
    let cipher = Hbsh::new(variant, key, rounds)
        .unwrap_or_else(|e| panic!("{name}: construction failed: {e}"));
    let expected_ct = hex_to_bytes(expected_ct_hex);

    let ciphertext = cipher
        .encrypt(plaintext, tweak)
        .unwrap_or_else(|e| panic!("{name}: encryption failed: {e}"));
    assert_eq!(ciphertext, expected_ct, "{name}: ciphertext mismatch");

    let decrypted = cipher
        .decrypt(&ciphertext, tweak)
        .unwrap_or_else(|e| panic!("{name}: decryption failed: {e}"));
    assert_eq!(decrypted, plaintext, "{name}: decryption mismatch");
}

/// Zero key, empty tweak, plaintext `00 01 .. 1f`.
fn run_zero_key(variant: Variant, rounds: usize, expected: &str) {
    run_test_vector(
        &format!("{variant}/{rounds} zero key"),
        variant,
        rounds,
        &[0u8; 32],
        &[],
        &pattern(32, 1, 0),
        expected,
    );
}

/// 67-byte plaintext under a 32-byte tweak.
fn run_odd_length(variant: Variant, rounds: usize, expected: &str) {
    run_test_vector(
        &format!("{variant}/{rounds} odd length"),
        variant,
        rounds,
        &pattern(32, 1, 0x80),
        &pattern(32, 3, 1),
        &pattern(67, 7, 5),
        expected,
    );
}

/// Exactly one block: the stream cipher sees an empty left half.
fn run_single_block(variant: Variant, rounds: usize, expected: &str) {
    run_test_vector(
        &format!("{variant}/{rounds} single block"),
        variant,
        rounds,
        &pattern(32, 1, 0x80),
        &[0x01],
        &pattern(16, 11, 0),
        expected,
    );
}

/// 4133 bytes: four full NH chunks plus a partial one. Only the ends of the
/// ciphertext are pinned.
fn run_multi_chunk(variant: Variant, rounds: usize, head: &str, tail: &str) {
    let cipher = Hbsh::new(variant, &pattern(32, 1, 0x80), rounds).unwrap();
    let plaintext = pattern(4133, 13, 9);
    let tweak = pattern(12, 1, 0);

    let ciphertext = cipher.encrypt(&plaintext, &tweak).unwrap();
    assert_eq!(ciphertext.len(), plaintext.len());
    assert_eq!(hex::encode(&ciphertext[..32]), head, "{variant}/{rounds} head");
    assert_eq!(hex::encode(&ciphertext[4133 - 32..]), tail, "{variant}/{rounds} tail");
    assert_eq!(cipher.decrypt(&ciphertext, &tweak).unwrap(), plaintext);
}

#[test]
fn test_adiantum8_vectors() {
    let v = Variant::Adiantum;
    run_zero_key(v, 8, "733105fa0912655c8b552967c64ddd1a48e1ea14e08b5ea6789ed7bcb703b8ba");
    run_odd_length(
        v,
        8,
        "5dbfe8d9635b09b016586a381e422b5ac76a8e873abad9c73b21e9c6fa1259fc
         535d75e2abaea9d37e201a2532e4b9bc63f038b1eab4282697d75f2dfa1410c8
         aba033",
    );
    run_single_block(v, 8, "0a44aee00d42acf418f69c2253e1dfc2");
    run_multi_chunk(
        v,
        8,
        "5fa1cc1d4342977967f82a762cfcd5f498279982e30f654980c5998ff7f5b9ed",
        "76d06fda474e43a1a39338211d886d700191153aec7249aa21a3683d855b3a42",
    );
}

#[test]
fn test_adiantum12_vectors() {
    let v = Variant::Adiantum;
    run_zero_key(v, 12, "3ea523ebda7f528f6b9c55fc2eaa2d310390d45e696ff8791bd519a0d704f8a9");
    run_odd_length(
        v,
        12,
        "c477e021eff94f391af8b69f4846a603e30805f3910d8815753ff370960d8395
         3d2f7245111d9a749567e49eb546f85da41f0a540c3883d5265d3118cecc07f6
         0b5f2b",
    );
    run_single_block(v, 12, "1b936c7baf8a9e713e0feaa8df129b42");
    run_multi_chunk(
        v,
        12,
        "b92edb895c3b1c5fba791f978d304806a5e4afbbf5a95a6228be7d2aa6259abf",
        "4fda7940d43d0de3dcade9683a8c6ac761d253499624bdd5bdf154600f6cb927",
    );
}

#[test]
fn test_adiantum20_vectors() {
    let v = Variant::Adiantum;
    run_zero_key(v, 20, "f433ebf55cc18611600da664587a9d5801e9d5bea007c7fdb46c2882a5659093");
    run_odd_length(
        v,
        20,
        "809b9748e3af73e120df0649aafab90dca13157a106b688f2c5876dd42b61bce
         e7256b2329d5761a4c35c9ddf3470d1feebfda7534017fca4ff8caa6d61947c3
         b5f461",
    );
    run_single_block(v, 20, "ec59cc2f98f3e7615dd29d23ebb3dcac");
    run_multi_chunk(
        v,
        20,
        "1eb1dafd6920364a856431f862ce5942672f11f18831b8427596ab62c3a55a68",
        "51bfc5a9a924e4b61309074d4fc0c3e64403fad5f4d714c1361f83c538148c61",
    );
}

#[test]
fn test_hpolyc8_vectors() {
    let v = Variant::HPolyC;
    run_zero_key(v, 8, "35564aecc085784f72a7018f47d44188db74cfa772adfa8ac977c42667090190");
    run_odd_length(
        v,
        8,
        "2e6a08d2ffebce9a933979c667dd576644ca4fcc891f1caf7c6584297a645d28
         18782962d1daeb49f3ad90726bebb31caad8fa7194ae694333a581a8a1e38d29
         ebeb81",
    );
    run_single_block(v, 8, "8960e41d187eaa15ececc7549270cdbb");
    run_multi_chunk(
        v,
        8,
        "e06529407cc55b87932814ede2244211e785790d4f4bc3bced9e26ad5eedb05a",
        "0e597ca6a0767cf9648dbc5ce5753f3bf2321d052d2d35a027c120c7ea1c9b8d",
    );
}

#[test]
fn test_hpolyc12_vectors() {
    let v = Variant::HPolyC;
    run_zero_key(v, 12, "8c0ee79ea97ab4eceeb2fd7345660da276d95a521b126d188699d15779e98ebd");
    run_odd_length(
        v,
        12,
        "74053c07c1bb070a2faf11e1b09c7b88d0bb1037fc4aee106f08446ea555bee7
         6d62cc56c0b1c2e9deb8dfa95104f86f69c4dc710444b2ed8b2cc709e7c031da
         746288",
    );
    run_single_block(v, 12, "0953ebed36b39c1317ab1832ebf55493");
    run_multi_chunk(
        v,
        12,
        "6d6200b97e36cdc7ce4e51180703d6cc49b8350674b81d8a780a0a144de5735c",
        "c65b5cd0ee03036215248e4307f29d8bb1ca399fa244e6165950cb5032f37025",
    );
}

#[test]
fn test_hpolyc20_vectors() {
    let v = Variant::HPolyC;
    run_zero_key(v, 20, "3ee713ccd49b22668ed12858bda3a5dbe0f3100be4aad26124c5992524b791b9");
    run_odd_length(
        v,
        20,
        "29a3f25214fcb0088589b0b04695da4aac27c4b6376dab2ca47a46679cae99e1
         63d147d6792edcc5e6da788a86da20690d52fb84193b6b53d3c81c2ab61d7c41
         d7f328",
    );
    run_single_block(v, 20, "e2b6121b031c819d0a561bdb50567934");
    run_multi_chunk(
        v,
        20,
        "b4d9d42016a4890cf0d516505267d7bbe12d7b95d1eb4a53cc05a43a7bca3c68",
        "44bcece5dc625f5547912b8680bccd2ce2b8bef9d2b5325784653cca8adbc130",
    );
}

#[test]
fn test_xchacha12_keystream_vector() {
    let cipher = crate::XChaCha::new(&pattern(32, 1, 0).try_into().unwrap(), crate::Rounds::R12);
    let mut keystream = [0u8; 48];
    cipher.apply_keystream(&pattern(16, 5, 3), &mut keystream).unwrap();
    assert_eq!(
        hex::encode(keystream),
        "2b4a260ae69b1a77e6430111942d02d98258ca9dde338522e9ce6082e2129502\
         166684e739b925b4b3a733dce67e2d7a"
    );
}

//! Default question set.
//!
//! Seeds an empty `questions` table and serves as the whole dataset in
//! fallback mode, where question ids are assigned 1..=10 in list order.

use crate::schema::{InsertQuestion, Question};

const DEFAULT_QUESTIONS: [(&str, [&str; 4], i32); 10] = [
    (
        "Apa yang dimaksud dengan angkatan kerja?",
        [
            "Seluruh penduduk dalam suatu negara",
            "Penduduk usia kerja yang bekerja dan sedang mencari pekerjaan",
            "Penduduk yang sudah pensiun",
            "Penduduk yang masih bersekolah",
        ],
        1,
    ),
    (
        "Batas usia minimal seseorang untuk masuk angkatan kerja di Indonesia adalah...",
        ["13 tahun", "15 tahun", "17 tahun", "21 tahun"],
        1,
    ),
    (
        "Apa yang dimaksud dengan pengangguran friksional?",
        [
            "Pengangguran karena tidak ada lowongan pekerjaan",
            "Pengangguran karena perubahan teknologi",
            "Pengangguran sementara karena sedang mencari pekerjaan yang lebih baik",
            "Pengangguran karena tidak mau bekerja",
        ],
        2,
    ),
    (
        "Upah Minimum Regional (UMR) ditetapkan oleh...",
        ["Presiden", "Menteri Tenaga Kerja", "Gubernur/Bupati/Walikota", "DPR"],
        2,
    ),
    (
        "Hak pekerja yang dijamin oleh undang-undang adalah...",
        [
            "Bekerja 12 jam sehari tanpa istirahat",
            "Mendapat upah yang layak dan cuti",
            "Tidak boleh membentuk serikat pekerja",
            "Tidak mendapat jaminan kesehatan",
        ],
        1,
    ),
    (
        "Apa yang dimaksud dengan tenaga kerja terampil?",
        [
            "Tenaga kerja yang tidak memerlukan pendidikan",
            "Tenaga kerja yang memiliki keahlian khusus melalui pendidikan atau pelatihan",
            "Tenaga kerja yang baru lulus sekolah",
            "Tenaga kerja yang bekerja di pemerintahan",
        ],
        1,
    ),
    (
        "BPJS Ketenagakerjaan memberikan perlindungan dalam hal...",
        [
            "Hanya kecelakaan kerja",
            "Kecelakaan kerja, jaminan hari tua, pensiun, dan kematian",
            "Hanya jaminan pensiun",
            "Hanya asuransi jiwa",
        ],
        1,
    ),
    (
        "Pengangguran struktural disebabkan oleh...",
        [
            "Pergantian musim",
            "Perubahan struktur ekonomi dan ketidakcocokan keterampilan",
            "Keinginan pribadi untuk tidak bekerja",
            "Liburan panjang",
        ],
        1,
    ),
    (
        "Kewajiban pekerja yang benar adalah...",
        [
            "Datang kerja sesuka hati",
            "Menaati peraturan perusahaan dan melaksanakan tugas dengan baik",
            "Tidak perlu menjaga kerahasiaan perusahaan",
            "Menolak perintah atasan",
        ],
        1,
    ),
    (
        "Tingkat Partisipasi Angkatan Kerja (TPAK) dihitung dengan rumus...",
        [
            "Jumlah pengangguran dibagi jumlah penduduk",
            "Jumlah angkatan kerja dibagi penduduk usia kerja dikali 100%",
            "Jumlah pekerja dibagi jumlah pengangguran",
            "Jumlah penduduk dibagi angkatan kerja",
        ],
        1,
    ),
];

pub fn default_count() -> usize {
    DEFAULT_QUESTIONS.len()
}

/// Fresh copy of the seed set, in seeding order.
pub fn default_questions() -> Vec<InsertQuestion> {
    DEFAULT_QUESTIONS
        .iter()
        .map(|(question, options, correct_answer)| InsertQuestion {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: *correct_answer,
        })
        .collect()
}

/// Seed set with sequential ids starting at 1.
pub fn default_questions_with_ids() -> Vec<Question> {
    default_questions()
        .into_iter()
        .zip(1..)
        .map(|(insert, id)| Question::from_insert(id, insert))
        .collect()
}

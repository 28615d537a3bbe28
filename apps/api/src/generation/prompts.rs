// All LLM prompt templates for the Generation module.
// Placeholders are filled with `llm_client::prompts::fill_template`.
// Output markers used here must stay in sync with generation/parser.rs.

/// Ad-copy prompt.
/// Fill: {product}, {target}, {price_line}, {benefits}, {unique_line}, {sales_period_line}
pub const AD_COPY_PROMPT_TEMPLATE: &str = r#"
以下の条件で商品・サービスの広告コピーを短文と長文の2種類作成してください:

商品名: {product}
ターゲット顧客: {target}
{price_line}
メリット:
{benefits}
{unique_line}
{sales_period_line}

【短文広告】
・50-70文字程度
・目を引くキャッチコピー
・即効性を感じさせる表現

【長文広告】
・400-600文字程度
・具体的なベネフィットを詳述
・行動喚起を含める
・信頼性を高める表現を含める
・感情に訴えかける要素を含める

両方とも日本語で作成し、広告らしい魅力的な表現を使用してください。
出力は必ず「【短文広告】」と「【長文広告】」の見出しで始まる2つのセクションにしてください。
"#;

/// Landing-page body prompt.
/// Fill: {title}, {description}, {benefits}, {price_line}, {tone_instruction}
pub const LP_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"
以下の商品・サービスについて、魅力的なランディングページの説明文を3〜5段落で作成してください:

タイトル: {title}
基本説明: {description}
主なメリット:
{benefits}
{price_line}

以下のポイントを含めた魅力的な説明文を作成してください:
1. 読者の課題や悩みに共感する導入
2. 商品・サービスがどのように課題を解決するか
3. 具体的なベネフィットの説明
4. 信頼性を高める要素
5. 行動を促す締めくくり

段落の間は空行で区切ってください。
{tone_instruction}
"#;

/// Landing-page headline prompt.
/// Fill: {title}, {description}, {benefits}
pub const LP_HEADLINE_PROMPT_TEMPLATE: &str = r#"
以下の商品・サービスについて、ランディングページの魅力的な見出しを3～5個作成してください:

タイトル: {title}
基本説明: {description}
主なメリット:
{benefits}

各見出しは30文字程度で、以下のようなフォーマットで作成してください:
1. 「[魅力的な見出し1]」
2. 「[魅力的な見出し2]」
3. 「[魅力的な見出し3]」

読者の注目を集め、興味を引くような魅力的な見出しを作成してください。
"#;

/// Webinar script prompt.
/// Fill: {topic}, {expertise}, {target}, {type_name}, {duration}, {sections},
///       {style}, {key_points_block}
pub const WEBINAR_SCRIPT_PROMPT_TEMPLATE: &str = r#"
以下の条件でウェビナー台本を作成してください:

テーマ: {topic}
専門分野: {expertise}
ターゲット視聴者: {target}
ウェビナータイプ: {type_name}（{duration}分）
セクション構成: {sections}
文体スタイル: {style}

{key_points_block}

フォーマット:
1. 各セクションのタイムライン（例: 00:00-02:00 導入）を含めてください
2. 各セクションには具体的な台本内容を含めてください
3. 話し言葉として自然な文体にしてください
4. 視聴者への問いかけを適宜含めてください
5. 専門用語は解説を加えながら使用してください

最も効果的なウェビナー台本を作成し、視聴者を引き込み、記憶に残る内容にしてください。
"#;

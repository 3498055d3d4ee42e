/*!

This is the long-form manual for `survey_charts` and `surveycharts`.

## The response table

The first worksheet (or the one given with `--excel-worksheet-name`) holds the responses:
the first row is the header, one column per question, one row per respondent. Column positions
are counted from 1 (column `A`). Two columns are bookkeeping:
* the segment column (default `B`), for example the class or the cohort of the respondent;
* everything before the first question column (default `C`) is ignored.

## The options sheet

An auxiliary worksheet named `opties` or `options` (the case does not matter) lists the valid
answers of each closed question. Each column of this sheet:
* starts with a header naming the question, either with the exact text of the question header or
  with its column letters (`D`, `AB`, ...);
* then lists the options, one per cell, in display order.

A question without options is an open question: its answers are shown as a list of texts.
A question with options is shown as a pie: every option is listed, even when nobody picked it,
and answers outside the list are counted under `Others`. Their text is kept under the chart.

With CSV input, the options sheet is a separate CSV file (`--options` or `optionsFilePath`).

## Grid questions

Several columns can form a single stacked-bar question. The first matching rule wins:
* explicit ranges: sets of column positions listed in `gridRanges`;
* shared prefix: all the headers starting with one of the `gridPrefixes`. Cells of these columns can
  hold several answers separated by commas;
* bracket stems: from the column `bracketGridColumn` onwards, headers of the form `Stem [Item]`
  with the same stem. `Item` is the label of the bar.

In grid columns without options, an answer starting with `other` counts as `Others`. The text after
the first colon (`Other: on the train`) is kept.

## Views

The columns before `splitColumn` form the first view (default name `Chatbots`), the others the second
view (default name `Copilot`). Any view name other than the second one selects the first view.

## Configuration file

All the keys are optional. Columns can be given as numbers or letters.

```json
{
  "source": {
    "provider": "csv",
    "filePath": "responses.csv",
    "optionsFilePath": "options.csv"
  },
  "layout": {
    "firstQuestionColumn": "C",
    "segmentColumn": "B",
    "splitColumn": "AB",
    "bracketGridColumn": "AB",
    "gridRanges": [["G", "H", "I"], ["J", "K", "L", "M"]],
    "gridPrefixes": ["Gebruik je wel eens verschillende chatbots?"],
    "multiValueColumns": ["N"],
    "multiValueHeaders": ["Wanneer kies je voor gebruik van Github Copilot?"]
  },
  "views": { "beforeSplit": "Chatbots", "fromSplit": "Copilot" },
  "segmentPriority": ["5HSD1", "5HSD2", "5HSD3", "5HSD4"],
  "palette": ["#4e79a7", "#f28e2b", "#e15759"],
  "othersLabel": "Others"
}
```

## Output

`surveycharts` prints a JSON report:

```text
{
  "charts": [ { "title": ..., "kind": "single-choice", "labels": [...], "values": [...], "colors": [...] }, ... ],
  "segments": ["5HSD1", "5HSD2", ...],
  "selectedSegment": null,
  "view": "Chatbots"
}
```

Grid charts carry a `series` list (`name`, `values`, `color`) and their bar labels in `labels`.
Open questions carry their answers in `otherTexts`.
*/
